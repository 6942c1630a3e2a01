//! Chat widget layout: header with status, transcript, input form.

use leptos::prelude::*;

use super::chat_form::ChatForm;
use super::status_indicator::StatusIndicator;
use super::transcript::Transcript;

/// Full chat widget.
#[component]
pub fn ChatPanel() -> impl IntoView {
    view! {
        <div class="chat-container">
            <header class="chat-header">
                <h1>"Agent Chat"</h1>
                <StatusIndicator/>
            </header>
            <Transcript/>
            <ChatForm/>
        </div>
    }
}
