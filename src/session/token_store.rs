use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredToken {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

/// File-based storage for the session's bearer token
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn save(&self, token: &str) -> Result<StoredToken> {
        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };

        self.ensure_parent_dir()?;
        self.write_json(&stored)?;

        info!("Saved session token to {}", self.path.display());
        Ok(stored)
    }

    pub fn load(&self) -> Result<Option<StoredToken>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).context("Failed to read token file")?;
        let stored = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse token file {}", self.path.display()))?;
        Ok(Some(stored))
    }

    /// Returns whether a token file was removed
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        fs::remove_file(&self.path).context("Failed to remove token file")?;
        info!("Removed session token {}", self.path.display());
        Ok(true)
    }

    // --- Helper Methods ---

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).context("Failed to create token directory")
            }
            _ => Ok(()),
        }
    }

    fn write_json<T: Serialize>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize token")?;
        fs::write(&self.path, json).context("Failed to write token file")?;
        Ok(())
    }
}
