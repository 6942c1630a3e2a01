//! Connection status dot and label for the config probe result.

use leptos::prelude::*;

use crate::state::session::ChatSession;

/// Status dot plus label, driven by `ChatSession::status`.
#[component]
pub fn StatusIndicator() -> impl IntoView {
    let session = expect_context::<RwSignal<ChatSession>>();

    let status = move || session.with(|s| s.status);
    let dot_class = move || format!("status-indicator status-{}", status().css_modifier());

    view! {
        <div class="config-status">
            <span class=dot_class></span>
            <span class="status-text">{move || status().label()}</span>
        </div>
    }
}
