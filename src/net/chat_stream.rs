//! Submission driver: request, read loop, error path, finalization.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat form accepts a [`Submission`] synchronously through
//! `ChatSession::begin_submission`, then spawns [`drive_submission`] on the
//! browser event loop. The driver owns the only suspension points of a
//! submission: opening the request and each body read.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (network, non-2xx, in-band `error` frame, body read error)
//! ends the read loop and is turned into a transcript notice. Finalization
//! runs exactly once afterwards regardless of how the submission ended.

#[cfg(test)]
#[path = "chat_stream_test.rs"]
mod chat_stream_test;

use std::future::Future;

use futures::{Stream, StreamExt};

use super::sse::{StreamEvent, Utf8ChunkDecoder, parse_chunk};
use super::types::ChatError;
use crate::state::session::{ChatSession, Submission};

/// Mutable access to the session from async code.
///
/// Returns `None` when the session is gone (e.g. the owning view was
/// disposed mid-stream); the driver treats that as nothing left to update.
pub trait SessionHandle {
    fn update_session<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R>;
}

impl SessionHandle for leptos::prelude::RwSignal<ChatSession> {
    fn update_session<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R> {
        use leptos::prelude::Update;
        self.try_update(f)
    }
}

/// Run an accepted submission to completion.
///
/// `open` issues the chat request and resolves to the response body as a
/// stream of byte chunks.
pub async fn drive_submission<H, F, Fut, S>(session: H, submission: Submission, open: F)
where
    H: SessionHandle,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<S, ChatError>>,
    S: Stream<Item = Result<Vec<u8>, ChatError>>,
{
    let outcome = match open(submission.message).await {
        Ok(body) => consume_body(&session, body).await,
        Err(e) => Err(e),
    };

    session.update_session(|s| {
        if let Err(e) = &outcome {
            leptos::logging::warn!("chat submission failed: {e}");
            s.fail_submission(e);
        }
        s.finalize_submission();
    });
}

/// Decode body chunks and apply their events until the body ends or fails.
async fn consume_body<H, S>(session: &H, body: S) -> Result<(), ChatError>
where
    H: SessionHandle,
    S: Stream<Item = Result<Vec<u8>, ChatError>>,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = Utf8ChunkDecoder::default();

    while let Some(chunk) = body.next().await {
        let text = decoder.decode(&chunk?);
        for event in parse_chunk(&text) {
            apply(session, event)?;
        }
    }

    apply(session, StreamEvent::End)
}

fn apply<H: SessionHandle>(session: &H, event: StreamEvent) -> Result<(), ChatError> {
    session
        .update_session(|s| s.apply_stream_event(event))
        .unwrap_or(Ok(()))
}
