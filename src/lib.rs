//! # agent-chat
//!
//! Leptos + WASM chat widget for a streaming agent backend.
//!
//! The widget probes `{base}/api/config` once on load, posts user messages to
//! `{base}/api/chat`, and renders the SSE-style reply incrementally. State
//! lives in a single `ChatSession` render model; components are views over it.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// Browser entry point: install the panic hook and logger, then mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already set: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
