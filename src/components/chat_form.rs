//! Message input and send button.
//!
//! SYSTEM CONTEXT
//! ==============
//! Accepts the submission synchronously against the session (so a second
//! submit while one is in flight is a no-op), then spawns the stream driver.
//! Inputs stay disabled until the driver finalizes the submission.

use leptos::prelude::*;

use crate::state::session::ChatSession;

/// Input form bound to the shared chat session.
#[component]
pub fn ChatForm() -> impl IntoView {
    let session = expect_context::<RwSignal<ChatSession>>();

    let input = RwSignal::new(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let processing = move || session.with(|s| s.is_processing);

    Effect::new(move || {
        let _ = session.with(|s| s.focus_seq);

        #[cfg(feature = "csr")]
        {
            if let Some(input_el) = input_ref.get() {
                let _ = input_el.focus();
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();
        let Some(submission) = session.try_update(|s| s.begin_submission(&text)).flatten() else {
            return;
        };
        input.set(String::new());

        let base = session.with_untracked(|s| s.api_base().to_owned());
        leptos::task::spawn_local(crate::net::chat_stream::drive_submission(
            session,
            submission,
            move |message| crate::net::api::open_chat_stream(base, message),
        ));
    };

    view! {
        <form class="chat-form" on:submit=on_submit>
            <input
                class="chat-input"
                type="text"
                placeholder="Type a message..."
                autocomplete="off"
                node_ref=input_ref
                disabled=processing
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
            />
            <button class="send-button" type="submit" disabled=processing>
                {move || if processing() { "Sending..." } else { "Send" }}
            </button>
        </form>
    }
}
