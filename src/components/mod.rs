//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat widget while reading/writing the shared
//! `ChatSession` from Leptos context.

pub mod chat_form;
pub mod chat_panel;
pub mod status_indicator;
pub mod transcript;
