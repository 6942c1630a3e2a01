//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and text formatting
//! from component logic to improve reuse and testability.

pub mod base_path;
pub mod format;
