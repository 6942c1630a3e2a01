//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The widget has a single session model; components depend on it through
//! context instead of reading the document directly.

pub mod session;
