//! Terminal task manager.
//!
//! A login-gated task list with priority/status filters, a validated
//! create/edit form and a persisted dark mode preference.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod preferences;
pub mod state;
pub mod tasks;
pub mod ui;
