//! High-score persistence.
//!
//! The session core never talks to storage. The driver hands beaten scores to
//! a [`HighScoreSaver`], which writes them in the background and keeps a failed
//! write around to retry with the next one.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("high score store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store holding one high score per user.
#[async_trait]
pub trait HighScoreStore: Send + Sync {
    /// Stored score, `0` for unknown users.
    async fn load(&self, user_id: &str) -> Result<u32, StoreError>;

    async fn save(&self, user_id: &str, score: u32) -> Result<(), StoreError>;
}

/// Process-local store (nothing survives a restart).
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: RwLock<HashMap<String, u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HighScoreStore for MemoryStore {
    async fn load(&self, user_id: &str) -> Result<u32, StoreError> {
        Ok(self.scores.read().await.get(user_id).copied().unwrap_or(0))
    }

    async fn save(&self, user_id: &str, score: u32) -> Result<(), StoreError> {
        self.scores.write().await.insert(user_id.to_string(), score);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    scores: BTreeMap<String, u32>,
}

/// JSON file store: `{"scores": {"<user>": <score>}}`.
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<ScoreFile, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ScoreFile::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl HighScoreStore for JsonFileStore {
    async fn load(&self, user_id: &str) -> Result<u32, StoreError> {
        let file = self.read_file().await?;
        Ok(file.scores.get(user_id).copied().unwrap_or(0))
    }

    async fn save(&self, user_id: &str, score: u32) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut file = self.read_file().await?;
        file.scores.insert(user_id.to_string(), score);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&file)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Saves high scores for one user, retrying failed writes.
pub struct HighScoreSaver {
    store: Arc<dyn HighScoreStore>,
    user_id: String,
    /// Best score whose write failed.
    unsaved: Mutex<Option<u32>>,
}

impl HighScoreSaver {
    pub fn new(store: Arc<dyn HighScoreStore>, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
            unsaved: Mutex::new(None),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Stored score, or `0` when the store cannot be read.
    pub async fn load(&self) -> u32 {
        match self.store.load(&self.user_id).await {
            Ok(score) => score,
            Err(error) => {
                warn!(user = %self.user_id, %error, "failed to load high score");
                0
            }
        }
    }

    /// Write `score` (or a larger score whose earlier write failed).
    ///
    /// A stored score that is already at least as high is left alone.
    /// Returns whether the store now holds the best score. Failures are logged
    /// and kept for the next call.
    pub async fn save(&self, score: u32) -> bool {
        let mut unsaved = self.unsaved.lock().await;
        let best = unsaved.map_or(score, |prev| prev.max(score));

        if let Ok(stored) = self.store.load(&self.user_id).await {
            if stored >= best {
                debug!(user = %self.user_id, stored, score = best, "stored high score kept");
                *unsaved = None;
                return true;
            }
        }

        match self.store.save(&self.user_id, best).await {
            Ok(()) => {
                info!(user = %self.user_id, score = best, "high score saved");
                *unsaved = None;
                true
            }
            Err(error) => {
                warn!(user = %self.user_id, score = best, %error, "failed to save high score");
                *unsaved = Some(best);
                false
            }
        }
    }

    /// Score still waiting for a successful write.
    pub async fn unsaved(&self) -> Option<u32> {
        *self.unsaved.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Store that can be switched offline.
    #[derive(Default)]
    struct FlakyStore {
        offline: AtomicBool,
        inner: MemoryStore,
    }

    #[async_trait]
    impl HighScoreStore for FlakyStore {
        async fn load(&self, user_id: &str) -> Result<u32, StoreError> {
            self.inner.load(user_id).await
        }

        async fn save(&self, user_id: &str, score: u32) -> Result<(), StoreError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("offline".to_string()));
            }
            self.inner.save(user_id, score).await
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("eco_sorter_{name}_{suffix}")).join("scores.json")
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("ana").await.unwrap(), 0);
        store.save("ana", 70).await.unwrap();
        assert_eq!(store.load("ana").await.unwrap(), 70);
        assert_eq!(store.load("bruno").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_json_store_missing_file_is_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.load("ana").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_json_store_persists_per_user() {
        let path = temp_path("persist");
        let store = JsonFileStore::new(&path);
        store.save("ana", 55).await.unwrap();
        store.save("bruno", 30).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load("ana").await.unwrap(), 55);
        assert_eq!(reopened.load("bruno").await.unwrap(), 30);

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["scores"]["ana"], 55);

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn test_json_store_rejects_garbage() {
        let path = temp_path("garbage");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load("ana").await,
            Err(StoreError::Malformed(_))
        ));

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn test_saver_retries_failed_write() {
        let store = Arc::new(FlakyStore::default());
        let saver = HighScoreSaver::new(store.clone(), "ana");

        store.offline.store(true, Ordering::SeqCst);
        assert!(!saver.save(40).await);
        assert_eq!(saver.unsaved().await, Some(40));
        assert_eq!(store.load("ana").await.unwrap(), 0);

        store.offline.store(false, Ordering::SeqCst);
        // A lower score still flushes the best unsaved one.
        assert!(saver.save(20).await);
        assert_eq!(saver.unsaved().await, None);
        assert_eq!(store.load("ana").await.unwrap(), 40);
    }

    #[tokio::test]
    async fn test_saver_never_lowers_stored_score() {
        let store = Arc::new(MemoryStore::new());
        store.save("ana", 90).await.unwrap();

        let saver = HighScoreSaver::new(store.clone(), "ana");
        assert!(saver.save(30).await);
        assert_eq!(store.load("ana").await.unwrap(), 90);
    }

    #[tokio::test]
    async fn test_saver_load_falls_back_to_zero() {
        struct Broken;

        #[async_trait]
        impl HighScoreStore for Broken {
            async fn load(&self, _: &str) -> Result<u32, StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }

            async fn save(&self, _: &str, _: u32) -> Result<(), StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }
        }

        let saver = HighScoreSaver::new(Arc::new(Broken), "ana");
        assert_eq!(saver.load().await, 0);
    }
}
