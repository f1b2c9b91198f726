//! Navigation-related state types.
//!
//! This module contains enums related to views and form field focus.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Login,
    TaskList,
    TaskForm,
    TaskDetail,
}

/// Specifying the task form fields, in focus order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Status,
}

impl FormField {
    /// Return the next field. The status field is only reachable while
    /// editing an existing task.
    ///
    pub fn next(&self, with_status: bool) -> FormField {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority if with_status => FormField::Status,
            FormField::Priority | FormField::Status => FormField::Title,
        }
    }

    /// Return the previous field.
    ///
    pub fn previous(&self, with_status: bool) -> FormField {
        match self {
            FormField::Title if with_status => FormField::Status,
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::Priority => FormField::Description,
            FormField::Status => FormField::Priority,
        }
    }
}
