//! Reusable UI widgets for the toolbar shell.

pub mod search_input;
