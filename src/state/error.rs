//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Action requires a logged in user
    #[error("Not logged in")]
    NotLoggedIn,

    /// No task is selected in the list
    #[error("No task selected")]
    NoSelection,

    /// Task not found in state
    #[error("Task not found: {id}")]
    TaskNotFound { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::NotLoggedIn;
        assert!(error.to_string().contains("Not logged in"));

        let error = StateError::NoSelection;
        assert!(error.to_string().contains("No task selected"));

        let error = StateError::TaskNotFound {
            id: "123456".to_string(),
        };
        assert!(error.to_string().contains("Task not found"));
        assert!(error.to_string().contains("123456"));
    }
}
