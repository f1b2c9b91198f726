//! Task form editing state.
//!
//! The draft values themselves live in the task list; this module keeps what
//! only the form surface needs: field focus, the multi-line description
//! editor and the errors of the last submission.

use super::navigation::FormField;
use crate::tasks::{Draft, Field, Priority, Status, ValidationErrors};
use tui_textarea::{CursorMove, TextArea};

/// Form surface state.
///
pub struct FormState {
    focus: FormField,
    description: TextArea<'static>,
    errors: ValidationErrors,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            focus: FormField::Title,
            description: TextArea::default(),
            errors: ValidationErrors::default(),
        }
    }
}

impl FormState {
    /// Reset the form to show the given draft.
    ///
    pub fn load(&mut self, draft: &Draft) -> &mut Self {
        self.focus = FormField::Title;
        self.description = TextArea::from(draft.description.lines().collect::<Vec<_>>());
        self.description.move_cursor(CursorMove::Bottom);
        self.description.move_cursor(CursorMove::End);
        self.errors = ValidationErrors::default();
        self
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) -> &mut Self {
        self.focus = field;
        self
    }

    pub fn description(&self) -> &TextArea<'static> {
        &self.description
    }

    pub fn description_editor(&mut self) -> &mut TextArea<'static> {
        &mut self.description
    }

    /// Return the description text as typed in the editor.
    ///
    pub fn description_text(&self) -> String {
        self.description.lines().join("\n")
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: ValidationErrors) -> &mut Self {
        self.errors = errors;
        self
    }

    pub fn clear_error(&mut self, field: FormField) -> &mut Self {
        self.errors.clear_field(validation_field(field));
        self
    }
}

/// Map a form field to the draft field it edits.
///
pub fn validation_field(field: FormField) -> Field {
    match field {
        FormField::Title => Field::Title,
        FormField::Description => Field::Description,
        FormField::Priority => Field::Priority,
        FormField::Status => Field::Status,
    }
}

/// Step a free-text priority value through the canonical labels. Values that
/// do not parse start over at the first label.
///
pub fn step_priority(value: &str, forward: bool) -> String {
    let next = match Priority::parse(value) {
        Some(priority) if forward => priority.next(),
        Some(priority) => priority.previous(),
        None => Priority::High,
    };
    next.label().to_string()
}

/// Step a free-text status value between the two labels.
///
pub fn step_status(value: &str) -> String {
    match Status::parse(value) {
        Some(status) => status.toggled().label().to_string(),
        None => Status::Pending.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{validate_draft, FieldError};

    #[test]
    fn test_load_resets_focus_and_errors() {
        let mut form = FormState::default();
        form.set_focus(FormField::Priority);
        form.set_errors(validate_draft(&Draft::default()));
        form.load(&Draft::new("Title", "line one\nline two", "Low"));
        assert_eq!(form.focus(), FormField::Title);
        assert!(form.errors().is_empty());
        assert_eq!(form.description_text(), "line one\nline two");
    }

    #[test]
    fn test_load_places_cursor_after_description() {
        let mut form = FormState::default();
        form.load(&Draft::new("Title", "line one\nline two", "Low"));
        assert_eq!(form.description().cursor(), (1, 8));
    }

    #[test]
    fn test_clear_error_only_touches_one_field() {
        let mut form = FormState::default();
        form.set_errors(validate_draft(&Draft::new("", "", "High")));
        form.clear_error(FormField::Title);
        assert!(form.errors().for_field(Field::Title).is_none());
        assert_eq!(
            form.errors().for_field(Field::Description),
            Some(&FieldError::DescriptionRequired)
        );
    }

    #[test]
    fn test_step_priority() {
        assert_eq!(step_priority("High", true), "Medium");
        assert_eq!(step_priority("Low", true), "High");
        assert_eq!(step_priority("High", false), "Low");
        assert_eq!(step_priority("Alta", true), "Medium");
        assert_eq!(step_priority("garbage", false), "High");
    }

    #[test]
    fn test_step_status() {
        assert_eq!(step_status("Pending"), "Completed");
        assert_eq!(step_status("Completada"), "Pending");
        assert_eq!(step_status(""), "Pending");
    }
}
