//! Authenticated session: access token and account record
//!
//! The session file is written by whatever performs the login. This crate
//! only reads it.

use crate::error::ScanError;
use crate::model::account::UserAccount;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_ACCESS_TOKEN: &str = "SURFACE_ACCESS_TOKEN";

/// Source of bearer tokens for API calls
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Result<String, ScanError>;
}

#[derive(Debug, Clone, Deserialize)]
struct SessionFile {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<UserAccount>,
}

/// Session backed by a JSON file on disk.
///
/// The token is re-read on every request so a refreshed session is picked
/// up without restarting.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SessionFile, String> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read session {}: {}", self.path.display(), e))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse session {}: {}", self.path.display(), e))
    }

    /// Account of the signed-in user
    pub fn load_account(&self) -> Result<UserAccount, String> {
        self.read()?
            .user
            .ok_or_else(|| format!("No user in session {}", self.path.display()))
    }
}

impl TokenProvider for SessionStore {
    fn access_token(&self) -> Result<String, ScanError> {
        if let Ok(token) = std::env::var(ENV_ACCESS_TOKEN) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
        let session = self.read().map_err(ScanError::Credential)?;
        match session.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ScanError::Credential(format!(
                "No access token in session {}",
                self.path.display()
            ))),
        }
    }
}

/// Fixed token for tests
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[cfg(test)]
impl TokenProvider for StaticToken {
    fn access_token(&self) -> Result<String, ScanError> {
        Ok(self.0.clone())
    }
}
