use crate::domain::model::StoredSession;
use crate::domain::ports::TokenStore;
use crate::utils::error::{ApiError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const DEFAULT_DIR: &str = ".federation-client";
const DEFAULT_FILE: &str = "session.json";

/// Session persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.federation-client/session.json`，沒有 HOME 時使用目前目錄
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR)
            .join(DEFAULT_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, data)?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Io(e)),
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| ApiError::TokenStore {
                message: format!("corrupt session file {}: {}", self.path.display(), e),
            })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Io(e)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<StoredSession>>> {
        self.session.lock().map_err(|_| ApiError::TokenStore {
            message: "session lock poisoned".to_string(),
        })
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, session: &StoredSession) -> Result<()> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.slot()?.clone())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}
