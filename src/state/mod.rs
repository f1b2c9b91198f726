//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Navigation types (View, FormField)
//! - Task form editing state
//! - State error handling

mod error;
mod form;
mod navigation;

pub use error::StateError;
pub use form::{validation_field, FormState};
pub use navigation::{FormField, View};

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
