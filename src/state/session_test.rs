use super::*;

fn kinds(session: &ChatSession) -> Vec<MessageKind> {
    session.transcript.iter().map(|m| m.kind).collect()
}

fn assistant_texts(session: &ChatSession) -> Vec<&str> {
    session
        .transcript
        .iter()
        .filter(|m| m.kind == MessageKind::Assistant)
        .map(|m| m.text.as_str())
        .collect()
}

fn notices(session: &ChatSession) -> Vec<&str> {
    session
        .transcript
        .iter()
        .filter(|m| m.kind == MessageKind::System)
        .map(|m| m.text.as_str())
        .collect()
}

fn complete_config() -> ConfigStatus {
    ConfigStatus { success: true, has_deployment_id: true, has_api_token: true, has_endpoint: Some(true) }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_session_is_idle_and_checking() {
    let session = ChatSession::new("/customApps/abc");
    assert_eq!(session.api_base(), "/customApps/abc");
    assert_eq!(session.status, ConnectionStatus::Checking);
    assert!(session.transcript.is_empty());
    assert!(!session.is_processing);
    assert!(session.stream.is_none());
}

#[test]
fn status_labels_and_modifiers() {
    assert_eq!(ConnectionStatus::Connected.css_modifier(), "connected");
    assert_eq!(ConnectionStatus::Warning.css_modifier(), "warning");
    assert_eq!(ConnectionStatus::Error.css_modifier(), "error");
    assert_eq!(ConnectionStatus::Connected.label(), "Connected");
}

// =============================================================
// Configuration probe
// =============================================================

#[test]
fn complete_config_connects_without_notice() {
    let mut session = ChatSession::default();
    session.apply_config_status(Ok(complete_config()));
    assert_eq!(session.status, ConnectionStatus::Connected);
    assert!(session.transcript.is_empty());
}

#[test]
fn incomplete_config_warns_with_one_notice() {
    for config in [
        ConfigStatus { has_deployment_id: false, ..complete_config() },
        ConfigStatus { has_api_token: false, ..complete_config() },
        ConfigStatus { success: false, ..complete_config() },
    ] {
        let mut session = ChatSession::default();
        session.apply_config_status(Ok(config));
        assert_eq!(session.status, ConnectionStatus::Warning);
        assert_eq!(notices(&session), vec![CONFIG_INCOMPLETE_NOTICE]);
    }
}

#[test]
fn failed_probe_sets_error_with_reason() {
    let mut session = ChatSession::default();
    session.apply_config_status(Err(ChatError::Status { status: 500, body: "Internal Server Error".to_owned() }));
    assert_eq!(session.status, ConnectionStatus::Error);
    assert_eq!(notices(&session), vec!["Error: HTTP 500: Internal Server Error"]);
}

#[test]
fn network_failure_sets_error() {
    let mut session = ChatSession::default();
    session.apply_config_status(Err(ChatError::Network("Failed to fetch".to_owned())));
    assert_eq!(session.status, ConnectionStatus::Error);
    assert_eq!(notices(&session).len(), 1);
}

// =============================================================
// begin_submission
// =============================================================

#[test]
fn begin_submission_appends_user_and_placeholder() {
    let mut session = ChatSession::default();
    let submission = session.begin_submission("  hello  ").expect("submission accepted");

    assert_eq!(submission.message, "hello");
    assert!(submission.thinking_id.starts_with("thinking-"));
    assert!(session.is_processing);
    assert_eq!(kinds(&session), vec![MessageKind::User, MessageKind::Thinking]);
    assert_eq!(session.transcript[0].text, "hello");
    assert_eq!(session.transcript[1].id, submission.thinking_id);

    let stream = session.stream.as_ref().expect("stream state created");
    assert!(stream.accumulated_text.is_empty());
    assert!(!stream.has_rendered_content);
    assert!(stream.message_id.is_none());
}

#[test]
fn begin_submission_rejects_blank_input() {
    let mut session = ChatSession::default();
    assert!(session.begin_submission("").is_none());
    assert!(session.begin_submission("   \n\t").is_none());
    assert!(session.transcript.is_empty());
    assert!(!session.is_processing);
}

#[test]
fn begin_submission_rejects_while_processing() {
    let mut session = ChatSession::default();
    session.begin_submission("first").expect("first accepted");
    let len = session.transcript.len();

    assert!(session.begin_submission("second").is_none());
    assert_eq!(session.transcript.len(), len);
}

// =============================================================
// Stream events
// =============================================================

#[test]
fn content_deltas_accumulate_into_one_bubble() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");

    session.apply_stream_event(StreamEvent::Content("Hi".to_owned())).expect("content ok");
    session.apply_stream_event(StreamEvent::Content(" there".to_owned())).expect("content ok");

    assert!(!session.has_thinking_placeholder());
    assert_eq!(assistant_texts(&session), vec!["Hi there"]);
    let stream = session.stream.as_ref().expect("stream active");
    assert_eq!(stream.accumulated_text, "Hi there");
    assert!(stream.has_rendered_content);
}

#[test]
fn heartbeat_changes_nothing() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    let before = session.transcript.clone();
    let stream_before = session.stream.clone();

    session.apply_stream_event(StreamEvent::Heartbeat).expect("heartbeat ok");

    assert_eq!(session.transcript, before);
    assert_eq!(session.stream, stream_before);
    assert!(session.has_thinking_placeholder());
}

#[test]
fn empty_content_delta_is_ignored() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    session.apply_stream_event(StreamEvent::Content(String::new())).expect("content ok");
    assert!(session.has_thinking_placeholder());
    assert!(assistant_texts(&session).is_empty());
}

#[test]
fn error_event_is_returned_as_stream_error() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    let err = session
        .apply_stream_event(StreamEvent::Error("boom".to_owned()))
        .expect_err("error event must fail");
    assert_eq!(err, ChatError::Stream("boom".to_owned()));
}

#[test]
fn end_without_content_adds_empty_notice() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    session.apply_stream_event(StreamEvent::End).expect("end ok");

    assert!(!session.has_thinking_placeholder());
    assert!(assistant_texts(&session).is_empty());
    assert_eq!(notices(&session), vec![EMPTY_RESPONSE_NOTICE]);
}

#[test]
fn end_after_content_keeps_bubble_without_notice() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    session.apply_stream_event(StreamEvent::Content("done".to_owned())).expect("content ok");
    session.apply_stream_event(StreamEvent::End).expect("end ok");

    assert_eq!(assistant_texts(&session), vec!["done"]);
    assert!(notices(&session).is_empty());
}

#[test]
fn content_without_active_stream_is_dropped() {
    let mut session = ChatSession::default();
    session.apply_stream_event(StreamEvent::Content("stray".to_owned())).expect("content ok");
    assert!(session.transcript.is_empty());
}

// =============================================================
// Failure + finalization
// =============================================================

#[test]
fn failure_removes_placeholder_and_shows_generic_notice() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    session.fail_submission(&ChatError::Stream("boom".to_owned()));

    assert!(!session.has_thinking_placeholder());
    assert_eq!(notices(&session), vec!["Communication error: boom"]);
}

#[test]
fn gateway_timeout_gets_dedicated_notice() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    session.fail_submission(&ChatError::Status { status: 504, body: "Gateway Time-out".to_owned() });
    assert_eq!(notices(&session), vec![GATEWAY_TIMEOUT_NOTICE]);
}

#[test]
fn failure_after_partial_content_keeps_partial_bubble() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    session.apply_stream_event(StreamEvent::Content("partial".to_owned())).expect("content ok");
    session.fail_submission(&ChatError::Body("reset".to_owned()));

    assert_eq!(assistant_texts(&session), vec!["partial"]);
    assert_eq!(notices(&session), vec!["Communication error: stream read failed: reset"]);
}

#[test]
fn finalize_releases_guard_and_requests_focus() {
    let mut session = ChatSession::default();
    session.begin_submission("hi").expect("accepted");
    let focus_before = session.focus_seq;

    session.finalize_submission();

    assert!(!session.is_processing);
    assert!(session.stream.is_none());
    assert_eq!(session.focus_seq, focus_before + 1);
    assert!(session.begin_submission("again").is_some());
}
