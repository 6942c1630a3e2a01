//! Chat session render model.
//!
//! DESIGN
//! ======
//! One `ChatSession` is created per page load and provided through Leptos
//! context. It holds plain data only (status, transcript, in-flight stream)
//! and every transition the widget goes through is a method here, so the
//! views stay pure functions of this struct and the transitions are testable
//! without a browser.
//!
//! Invariants:
//! - At most one `StreamState` exists, and only while `is_processing` is set.
//! - `StreamState::accumulated_text` is append-only for one stream.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::sse::StreamEvent;
use crate::net::types::{ChatError, ConfigStatus};

/// Speaker label for user bubbles.
pub const USER_LABEL: &str = "You";
/// Speaker label for assistant bubbles and the thinking placeholder.
pub const AGENT_LABEL: &str = "Agent";

pub const CONFIG_INCOMPLETE_NOTICE: &str =
    "Warning: the agent configuration is incomplete. Check the backend environment variables.";
pub const EMPTY_RESPONSE_NOTICE: &str = "Error: the response was empty.";
pub const GATEWAY_TIMEOUT_NOTICE: &str = "Error: the server took too long to respond.";

/// Result of the one-shot configuration probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Probe still in flight.
    #[default]
    Checking,
    Connected,
    /// Backend reachable but missing a deployment id or API token.
    Warning,
    Error,
}

impl ConnectionStatus {
    /// Text shown next to the status dot.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Checking => "Checking...",
            Self::Connected => "Connected",
            Self::Warning => "Configuration incomplete",
            Self::Error => "Connection error",
        }
    }

    /// CSS modifier used as `status-indicator status-{modifier}`.
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Connected => "connected",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Kind of transcript entry; drives styling and rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Assistant,
    /// Notice rendered as plain text (warnings, errors, empty responses).
    System,
    /// Transient "thinking" placeholder.
    Thinking,
}

/// One transcript entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub kind: MessageKind,
    /// Raw text; formatting happens at render time.
    pub text: String,
}

impl ChatMessage {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), kind, text: text.into() }
    }
}

/// Per-submission streaming state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamState {
    /// Transcript id of the thinking placeholder for this submission.
    pub thinking_id: String,
    /// Every content delta received so far, in arrival order.
    pub accumulated_text: String,
    /// True once the first content delta removed the placeholder.
    pub has_rendered_content: bool,
    /// Transcript id of the assistant bubble, created on first content.
    pub message_id: Option<String>,
}

/// Accepted submission handed to the network driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Trimmed user text sent as the request body.
    pub message: String,
    pub thinking_id: String,
}

/// Session state for one page load.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    /// Prefix for every API call; fixed after construction.
    api_base: String,
    pub status: ConnectionStatus,
    pub transcript: Vec<ChatMessage>,
    /// Guards against concurrent submissions.
    pub is_processing: bool,
    pub stream: Option<StreamState>,
    /// Bumped when the input should regain focus.
    pub focus_seq: u64,
    /// Bumped when the transcript should scroll to its bottom.
    pub scroll_seq: u64,
}

impl ChatSession {
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into(), ..Self::default() }
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Record the configuration probe outcome.
    pub fn apply_config_status(&mut self, result: Result<ConfigStatus, ChatError>) {
        match result {
            Ok(config) if config.is_complete() => {
                self.status = ConnectionStatus::Connected;
            }
            Ok(_) => {
                self.status = ConnectionStatus::Warning;
                self.push_notice(CONFIG_INCOMPLETE_NOTICE);
            }
            Err(e) => {
                self.status = ConnectionStatus::Error;
                self.push_notice(format!("Error: {e}"));
            }
        }
    }

    /// Append a plain-text system notice.
    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.push(ChatMessage::new(MessageKind::System, text));
    }

    /// Accept user input and open a stream, or return `None` when busy or blank.
    ///
    /// On acceptance the user bubble and the thinking placeholder are
    /// appended and the session is marked as processing.
    pub fn begin_submission(&mut self, input: &str) -> Option<Submission> {
        if self.is_processing {
            return None;
        }
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        self.push(ChatMessage::new(MessageKind::User, message));
        self.is_processing = true;

        let thinking_id = format!("thinking-{}", uuid::Uuid::new_v4());
        self.push(ChatMessage { id: thinking_id.clone(), kind: MessageKind::Thinking, text: String::new() });
        self.stream = Some(StreamState {
            thinking_id: thinking_id.clone(),
            accumulated_text: String::new(),
            has_rendered_content: false,
            message_id: None,
        });

        Some(Submission { message: message.to_owned(), thinking_id })
    }

    /// Apply one stream event to the active submission.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Stream`] for an in-band error; the caller must
    /// route it to [`ChatSession::fail_submission`].
    pub fn apply_stream_event(&mut self, event: StreamEvent) -> Result<(), ChatError> {
        match event {
            StreamEvent::Heartbeat => Ok(()),
            StreamEvent::Content(delta) => {
                self.append_content(&delta);
                Ok(())
            }
            StreamEvent::Error(message) => Err(ChatError::Stream(message)),
            StreamEvent::End => {
                self.finish_stream();
                Ok(())
            }
        }
    }

    fn append_content(&mut self, delta: &str) {
        if delta.is_empty() {
            return;
        }
        let Some(stream) = self.stream.as_mut() else {
            return;
        };

        if !stream.has_rendered_content {
            remove_message(&mut self.transcript, &stream.thinking_id);
            stream.has_rendered_content = true;
        }

        stream.accumulated_text.push_str(delta);

        let message_id = match &stream.message_id {
            Some(id) => id.clone(),
            None => {
                let message = ChatMessage::new(MessageKind::Assistant, "");
                let id = message.id.clone();
                self.transcript.push(message);
                stream.message_id = Some(id.clone());
                id
            }
        };

        if let Some(message) = self.transcript.iter_mut().find(|m| m.id == message_id) {
            message.text.clone_from(&stream.accumulated_text);
        }
        self.scroll_seq += 1;
    }

    /// Close out a stream that ended without a terminal error.
    fn finish_stream(&mut self) {
        let Some(stream) = self.stream.as_ref() else {
            return;
        };
        remove_message(&mut self.transcript, &stream.thinking_id);
        if stream.message_id.is_none() || stream.accumulated_text.is_empty() {
            self.push_notice(EMPTY_RESPONSE_NOTICE);
        }
    }

    /// Show the failure for the active submission.
    pub fn fail_submission(&mut self, error: &ChatError) {
        if let Some(stream) = self.stream.as_ref() {
            remove_message(&mut self.transcript, &stream.thinking_id);
        }
        if error.is_gateway_timeout() {
            self.push_notice(GATEWAY_TIMEOUT_NOTICE);
        } else {
            self.push_notice(format!("Communication error: {error}"));
        }
    }

    /// Release the submission guard and hand focus back to the input.
    ///
    /// Runs once per accepted submission on every exit path.
    pub fn finalize_submission(&mut self) {
        self.is_processing = false;
        self.stream = None;
        self.focus_seq += 1;
    }

    /// True while a thinking placeholder is in the transcript.
    #[must_use]
    pub fn has_thinking_placeholder(&self) -> bool {
        self.transcript.iter().any(|m| m.kind == MessageKind::Thinking)
    }

    fn push(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.scroll_seq += 1;
    }
}

fn remove_message(transcript: &mut Vec<ChatMessage>, id: &str) {
    transcript.retain(|m| m.id != id);
}
