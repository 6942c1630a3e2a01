//! Networking modules for the config probe and the streamed chat reply.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles HTTP calls, `sse` classifies stream lines, `chat_stream`
//! drives one submission end to end, and `types` defines the wire schema.

pub mod api;
pub mod chat_stream;
pub mod sse;
pub mod types;
