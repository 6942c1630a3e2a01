//! Transcript view: one bubble per `ChatMessage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendering is a pure function of the session transcript. Assistant bubbles
//! are re-rendered from their full text on every delta, so the formatted
//! markup is always derived from the whole reply rather than patched.

#[cfg(test)]
#[path = "transcript_test.rs"]
mod transcript_test;

use leptos::prelude::*;

use crate::state::session::{AGENT_LABEL, ChatMessage, ChatSession, MessageKind, USER_LABEL};
use crate::util::format::labeled_message_html;

/// Scrollable list of transcript bubbles.
#[component]
pub fn Transcript() -> impl IntoView {
    let session = expect_context::<RwSignal<ChatSession>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = session.with(|s| s.scroll_seq);

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="chat-messages" node_ref=messages_ref>
            {move || {
                session
                    .with(|s| s.transcript.clone())
                    .into_iter()
                    .map(render_message)
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

fn render_message(message: ChatMessage) -> AnyView {
    let class = message_class(message.kind);
    match message.kind {
        MessageKind::System => view! {
            <div class=class>
                <div class="message-content">{message.text}</div>
            </div>
        }
        .into_any(),
        MessageKind::Thinking => view! {
            <div class=class id=message.id>
                <div class="message-content">
                    <strong>{format!("{AGENT_LABEL}:")}</strong>
                    " "
                    <span class="thinking-dots">"Thinking"<span>"."</span><span>"."</span><span>"."</span></span>
                </div>
            </div>
        }
        .into_any(),
        MessageKind::User | MessageKind::Assistant => {
            let body = bubble_html(&message);
            view! {
                <div class=class>
                    <div class="message-content" inner_html=body></div>
                </div>
            }
            .into_any()
        }
    }
}

/// CSS classes for a transcript entry.
pub fn message_class(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::User => "message user-message",
        MessageKind::Assistant => "message bot-message",
        MessageKind::System => "message system-message",
        MessageKind::Thinking => "message bot-message thinking",
    }
}

/// Label plus formatted body for user and assistant bubbles.
pub fn bubble_html(message: &ChatMessage) -> String {
    let label = if message.kind == MessageKind::User { USER_LABEL } else { AGENT_LABEL };
    labeled_message_html(label, &message.text)
}
