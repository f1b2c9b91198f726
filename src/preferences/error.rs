//! Preference-store-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Failed to read the preferences file
    #[error("Failed to read preferences from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the preferences file
    #[error("Failed to write preferences to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Preferences file is not a valid key-value document
    #[error("Failed to parse preferences: {0}")]
    Malformed(String),

    /// Failed to serialize a preference value
    #[error("Failed to serialize preference value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store lock was poisoned by a panicking writer
    #[error("Preference store lock poisoned")]
    LockPoisoned,

    /// Background writer is no longer running
    #[error("Preference writer stopped: {0}")]
    WriterStopped(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_error_display() {
        let error = PreferenceError::Malformed("bad yaml".to_string());
        assert!(error.to_string().contains("parse preferences"));
        assert!(error.to_string().contains("bad yaml"));

        let error = PreferenceError::LockPoisoned;
        assert!(error.to_string().contains("poisoned"));

        let error = PreferenceError::WriterStopped("channel closed".to_string());
        assert!(error.to_string().contains("channel closed"));
    }

    #[test]
    fn test_preference_error_with_path() {
        let error = PreferenceError::WriteFailed {
            path: PathBuf::from("/prefs/preferences.yml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("/prefs/preferences.yml"));
        assert!(error_str.contains("denied"));
    }
}
