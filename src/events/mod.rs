//! Event handling module.
//!
//! Terminal events: user input polled on a background thread and applied to
//! the application state.

pub mod terminal;
