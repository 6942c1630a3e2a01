//! Line dispatch for the chat response stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat endpoint answers with an SSE-like body: `data: {json}` frames,
//! optionally interleaved with `:` comment lines used as heartbeats while
//! the agent is still working. This module turns decoded text into
//! [`StreamEvent`]s; applying them is the session's job.
//!
//! TRADE-OFFS
//! ==========
//! Each decoded chunk is split on `\n` on its own. A line whose bytes arrive
//! across two reads is not reassembled: both fragments are dispatched as
//! separate lines and usually dropped as unrecognized or unparseable. Only
//! UTF-8 sequences are carried across reads (see [`Utf8ChunkDecoder`]).

#[cfg(test)]
#[path = "sse_test.rs"]
mod sse_test;

use super::types::StreamPayload;

const DATA_PREFIX: &str = "data: ";
const DONE_TOKEN: &str = "[DONE]";

/// A single observable event from the chat stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    /// `:`-prefixed comment line; keeps the thinking placeholder visible.
    Heartbeat,
    /// A non-empty content delta to append to the assistant reply.
    Content(String),
    /// In-band failure reported by the server; terminal for the submission.
    Error(String),
    /// The body finished without a terminal error.
    End,
}

/// Classify one line of a decoded chunk.
///
/// Returns `None` for lines with no effect: blank data, `[DONE]`, payloads
/// without usable fields, unparseable JSON and unrecognized shapes.
pub fn parse_line(line: &str) -> Option<StreamEvent> {
    if line.starts_with(':') {
        leptos::logging::log!("heartbeat received, agent is processing");
        return Some(StreamEvent::Heartbeat);
    }

    let token = line.strip_prefix(DATA_PREFIX)?.trim();
    if token.is_empty() || token == DONE_TOKEN {
        return None;
    }

    let payload = match serde_json::from_str::<StreamPayload>(token) {
        Ok(payload) => payload,
        Err(e) => {
            leptos::logging::warn!("discarding unparseable stream frame: {e}; data={token}");
            return None;
        }
    };

    if let Some(error) = payload.error.filter(|e| !e.is_empty()) {
        return Some(StreamEvent::Error(error));
    }
    payload
        .content
        .filter(|c| !c.is_empty())
        .map(StreamEvent::Content)
}

/// Split a decoded chunk on `\n` and classify every line.
pub fn parse_chunk(chunk: &str) -> Vec<StreamEvent> {
    chunk.split('\n').filter_map(parse_line).collect()
}

/// Incremental UTF-8 decoder for body reads.
///
/// An incomplete multi-byte sequence at the end of one read is held back and
/// completed by the next. Invalid sequences decode to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    /// Decode as much of `bytes` (plus any held-back tail) as forms whole characters.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                        None => {
                            self.pending.drain(..valid);
                            return out;
                        }
                    }
                }
            }
        }
    }

    /// Number of bytes held back waiting for the rest of a character.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
