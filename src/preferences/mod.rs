//! User preference persistence.
//!
//! The only persisted value is the dark-mode flag. It is read once at startup
//! and written back, fire-and-forget, on every toggle through a background
//! writer task.

mod error;
mod store;

pub use error::PreferenceError;
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

use log::*;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

pub const DARK_MODE_KEY: &str = "darkMode";

/// Completion signal for a queued write. Callers are free to drop it.
///
pub type WriteCompletion = oneshot::Receiver<Result<(), PreferenceError>>;

struct WriteRequest {
    key: String,
    value: String,
    done: oneshot::Sender<Result<(), PreferenceError>>,
}

/// Handle to the background task that applies preference writes in order.
///
#[derive(Clone)]
pub struct PreferenceWriter {
    sender: mpsc::UnboundedSender<WriteRequest>,
}

impl PreferenceWriter {
    /// Spawn the writer task on the current tokio runtime.
    ///
    pub fn spawn(store: Arc<dyn PreferenceStore>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<WriteRequest>();
        tokio::spawn(async move {
            while let Some(WriteRequest { key, value, done }) = receiver.recv().await {
                let store = Arc::clone(&store);
                let blocking_key = key.clone();
                let result = tokio::task::spawn_blocking(move || store.set(&blocking_key, &value))
                    .await
                    .unwrap_or_else(|e| Err(PreferenceError::WriterStopped(e.to_string())));
                if let Err(e) = &result {
                    error!("Failed to persist preference '{}': {}", key, e);
                }
                // The requester may have dropped its completion receiver.
                let _ = done.send(result);
            }
            debug!("Preference writer stopped.");
        });
        PreferenceWriter { sender }
    }

    /// Queue a write without waiting for it.
    ///
    pub fn write(&self, key: &str, value: String) -> WriteCompletion {
        let (done, completion) = oneshot::channel();
        let request = WriteRequest {
            key: key.to_string(),
            value,
            done,
        };
        if let Err(mpsc::error::SendError(request)) = self.sender.send(request) {
            warn!("Preference writer unavailable, dropping write of '{}'.", request.key);
            let _ = request
                .done
                .send(Err(PreferenceError::WriterStopped("channel closed".to_string())));
        }
        completion
    }
}

/// Loaded user preferences.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    dark_mode: bool,
}

impl Preferences {
    pub fn new(dark_mode: bool) -> Self {
        Preferences { dark_mode }
    }

    /// Read preferences from the store. Missing or unreadable values fall back
    /// to the defaults.
    ///
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let dark_mode = match store.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<bool>(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Ignoring malformed '{}' preference {:?}: {}", DARK_MODE_KEY, raw, e);
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read preferences: {}", e);
                false
            }
        };
        debug!("Loaded preferences (dark mode: {}).", dark_mode);
        Preferences { dark_mode }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip dark mode locally and queue the new value for persistence.
    /// Returns the completion signal of the write, if one was queued.
    ///
    pub fn toggle_dark_mode(
        &mut self,
        writer: Option<&PreferenceWriter>,
    ) -> Option<WriteCompletion> {
        self.dark_mode = !self.dark_mode;
        info!("Dark mode {}.", if self.dark_mode { "enabled" } else { "disabled" });
        let writer = writer?;
        match self.write_dark_mode(writer) {
            Ok(completion) => Some(completion),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    /// Queue the current dark mode value, encoded as a JSON boolean.
    ///
    pub fn write_dark_mode(
        &self,
        writer: &PreferenceWriter,
    ) -> Result<WriteCompletion, PreferenceError> {
        let value = serde_json::to_string(&self.dark_mode)?;
        Ok(writer.write(DARK_MODE_KEY, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults_to_light_mode() {
        let store = MemoryPreferenceStore::new();
        assert!(!Preferences::load(&store).dark_mode());
    }

    #[test]
    fn load_reads_serialized_boolean() {
        let store = MemoryPreferenceStore::with_value(DARK_MODE_KEY, "true");
        assert!(Preferences::load(&store).dark_mode());
    }

    #[test]
    fn load_ignores_malformed_value() {
        let store = MemoryPreferenceStore::with_value(DARK_MODE_KEY, "yes please");
        assert!(!Preferences::load(&store).dark_mode());
    }

    #[test]
    fn toggle_without_writer_is_local_only() {
        let mut preferences = Preferences::default();
        assert!(preferences.toggle_dark_mode(None).is_none());
        assert!(preferences.dark_mode());
        preferences.toggle_dark_mode(None);
        assert!(!preferences.dark_mode());
    }

    #[tokio::test]
    async fn toggle_persists_through_writer() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let writer = PreferenceWriter::spawn(store.clone());
        let mut preferences = Preferences::load(&*store);

        let completion = preferences.toggle_dark_mode(Some(&writer)).unwrap();
        assert!(preferences.dark_mode());
        completion.await.unwrap().unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        let completion = preferences.toggle_dark_mode(Some(&writer)).unwrap();
        completion.await.unwrap().unwrap();
        assert_eq!(Preferences::load(&*store), Preferences::new(false));
    }

    #[tokio::test]
    async fn writes_apply_in_order_even_when_not_awaited() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let writer = PreferenceWriter::spawn(store.clone());
        let mut preferences = Preferences::default();
        for _ in 0..4 {
            drop(preferences.toggle_dark_mode(Some(&writer)));
        }
        let last = preferences.toggle_dark_mode(Some(&writer)).unwrap();
        last.await.unwrap().unwrap();
        assert!(preferences.dark_mode());
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn write_dark_mode_stores_current_value() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let writer = PreferenceWriter::spawn(store.clone());
        let preferences = Preferences::new(true);
        preferences.write_dark_mode(&writer).unwrap().await.unwrap().unwrap();
        assert!(preferences.dark_mode());
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    }
}
