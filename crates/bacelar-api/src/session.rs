//! Explicit session lifecycle: load-or-absent on startup, save after
//! login, clear on logout. The session is a value passed to whoever needs
//! it; there is no ambient global.

use std::io;
use std::path::Path;

use bacelar_core::model::User;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("session file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    /// Read a stored session, or `None` when nobody is logged in.
    pub fn load(path: &Path) -> Result<Option<Session>, SessionError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(user = %self.user.name, "session saved");
        Ok(())
    }

    /// Teardown. Idempotent: clearing an absent session is not an error.
    pub fn clear(path: &Path) -> Result<(), SessionError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
