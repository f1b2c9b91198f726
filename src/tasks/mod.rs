//! Task list management.
//!
//! This module holds the only decision logic of the application:
//! - Task, priority and status types
//! - The priority/status filter and the visible-task projection
//! - Draft validation
//! - `TaskList`, which owns the tasks, filter and draft and applies edits

mod draft;
mod filter;
mod manager;
mod model;

pub use draft::{
    parse_draft, validate_draft, Draft, Field, FieldError, ValidDraft, ValidationErrors,
    DESCRIPTION_MIN_LEN, TITLE_MIN_LEN,
};
pub use filter::{visible_tasks, Filter, PriorityFilter, StatusFilter};
pub use manager::{Submitted, TaskList};
pub use model::{Priority, Status, Task};
