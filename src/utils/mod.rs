//! Utility helpers shared across the widget library.

pub mod debouncer;
pub mod logging;
