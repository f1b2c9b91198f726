//! Draft values for a task being created or edited, and their validation.

use super::model::{Priority, Status, Task};
use std::fmt;

pub const TITLE_MIN_LEN: usize = 3;
pub const DESCRIPTION_MIN_LEN: usize = 5;

/// In-progress field values, not yet committed to the task list.
///
/// `status` is only present while editing an existing task.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: Option<String>,
}

impl Default for Draft {
    fn default() -> Self {
        Draft {
            title: String::new(),
            description: String::new(),
            priority: Priority::default().label().to_string(),
            status: None,
        }
    }
}

impl Draft {
    pub fn new(title: &str, description: &str, priority: &str) -> Self {
        Draft {
            title: title.to_string(),
            description: description.to_string(),
            priority: priority.to_string(),
            status: None,
        }
    }

    /// Pre-fill a draft from an existing task, status selector included.
    ///
    pub fn from_task(task: &Task) -> Self {
        Draft {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority.label().to_string(),
            status: Some(task.status.label().to_string()),
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }
}

/// Draft fields that can carry a validation error.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Description,
    Priority,
    Status,
}

/// A single field-level validation failure.
///
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("title required")]
    TitleRequired,

    #[error("title too short")]
    TitleTooShort,

    #[error("description required")]
    DescriptionRequired,

    #[error("description too short")]
    DescriptionTooShort,

    #[error("invalid priority")]
    InvalidPriority,

    #[error("invalid status")]
    InvalidStatus,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::TitleRequired | FieldError::TitleTooShort => Field::Title,
            FieldError::DescriptionRequired | FieldError::DescriptionTooShort => {
                Field::Description
            }
            FieldError::InvalidPriority => Field::Priority,
            FieldError::InvalidStatus => Field::Status,
        }
    }
}

/// Set of field errors produced by [`validate_draft`]. At most one error is
/// kept per field, in field order.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "draft rejected: {}", messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Return the error reported for the given field, if any.
    ///
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.errors.contains(error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Forget the error of a field, e.g. once the user starts correcting it.
    ///
    pub fn clear_field(&mut self, field: Field) {
        self.errors.retain(|e| e.field() != field);
    }

    fn push(&mut self, error: FieldError) {
        if self.for_field(error.field()).is_none() {
            self.errors.push(error);
        }
    }
}

/// Values of a draft that passed validation.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Option<Status>,
}

/// Validate a draft without touching any state. Lengths are counted in
/// characters after trimming surrounding whitespace.
///
pub fn validate_draft(draft: &Draft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push(FieldError::TitleRequired);
    } else if title.chars().count() < TITLE_MIN_LEN {
        errors.push(FieldError::TitleTooShort);
    }

    let description = draft.description.trim();
    if description.is_empty() {
        errors.push(FieldError::DescriptionRequired);
    } else if description.chars().count() < DESCRIPTION_MIN_LEN {
        errors.push(FieldError::DescriptionTooShort);
    }

    if Priority::parse(&draft.priority).is_none() {
        errors.push(FieldError::InvalidPriority);
    }

    if let Some(status) = &draft.status {
        if Status::parse(status).is_none() {
            errors.push(FieldError::InvalidStatus);
        }
    }

    errors
}

/// Validate and convert a draft into typed values.
///
pub fn parse_draft(draft: &Draft) -> Result<ValidDraft, ValidationErrors> {
    let errors = validate_draft(draft);
    if !errors.is_empty() {
        return Err(errors);
    }
    let priority = Priority::parse(&draft.priority).ok_or_else(|| {
        let mut errors = ValidationErrors::default();
        errors.push(FieldError::InvalidPriority);
        errors
    })?;
    Ok(ValidDraft {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        priority,
        status: draft.status.as_deref().and_then(Status::parse),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_draft_has_no_errors() {
        let draft = Draft::new("Buy milk", "2% milk", "High");
        assert!(validate_draft(&draft).is_empty());
    }

    #[test]
    fn short_title_is_rejected() {
        let draft = Draft::new("Hi", "hello", "High");
        let errors = validate_draft(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.for_field(Field::Title), Some(&FieldError::TitleTooShort));
    }

    #[test]
    fn empty_and_whitespace_fields_are_required() {
        let draft = Draft::new("   ", "", "Low");
        let errors = validate_draft(&draft);
        assert!(errors.contains(&FieldError::TitleRequired));
        assert!(errors.contains(&FieldError::DescriptionRequired));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn lengths_are_measured_after_trimming() {
        let draft = Draft::new("  ab  ", "  abcd   ", "Medium");
        let errors = validate_draft(&draft);
        assert_eq!(errors.for_field(Field::Title), Some(&FieldError::TitleTooShort));
        assert_eq!(
            errors.for_field(Field::Description),
            Some(&FieldError::DescriptionTooShort)
        );

        let draft = Draft::new(" abc ", " abcde ", "Medium");
        assert!(validate_draft(&draft).is_empty());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let draft = Draft::new("día", "acción", "Baja");
        assert!(validate_draft(&draft).is_empty());
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let draft = Draft::new("Write report", "Quarterly numbers", "Someday");
        let errors = validate_draft(&draft);
        assert_eq!(errors.for_field(Field::Priority), Some(&FieldError::InvalidPriority));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn status_is_only_checked_when_present() {
        let draft = Draft::new("Write report", "Quarterly numbers", "High");
        assert!(validate_draft(&draft).is_empty());

        let draft = draft.with_status("Archived");
        let errors = validate_draft(&draft);
        assert_eq!(errors.for_field(Field::Status), Some(&FieldError::InvalidStatus));

        let draft =
            Draft::new("Write report", "Quarterly numbers", "High").with_status("Completada");
        assert!(validate_draft(&draft).is_empty());
    }

    #[test]
    fn validation_is_deterministic() {
        let draft = Draft::new("x", "", "?").with_status("?");
        assert_eq!(validate_draft(&draft), validate_draft(&draft));
        assert_eq!(validate_draft(&draft).len(), 4);
    }

    #[test]
    fn errors_display_user_facing_text() {
        let errors = validate_draft(&Draft::new("", "abc", "High"));
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["title required", "description too short"]);
        assert!(errors.to_string().contains("title required"));
    }

    #[test]
    fn parse_draft_trims_and_types_values() {
        let draft = Draft::new("  Buy milk ", " 2% milk ", "urgente").with_status("Completed");
        let valid = parse_draft(&draft).unwrap();
        assert_eq!(valid.title, "Buy milk");
        assert_eq!(valid.description, "2% milk");
        assert_eq!(valid.priority, Priority::High);
        assert_eq!(valid.status, Some(Status::Completed));
    }

    #[test]
    fn draft_from_task_carries_status() {
        let task = Task {
            id: "7".to_string(),
            title: "Plan trip".to_string(),
            description: "Book the hotel".to_string(),
            priority: Priority::Low,
            status: Status::Completed,
        };
        let draft = Draft::from_task(&task);
        assert_eq!(draft.priority, "Low");
        assert_eq!(draft.status.as_deref(), Some("Completed"));
        assert!(!draft.is_blank());
        assert!(Draft::default().is_blank());
    }
}
