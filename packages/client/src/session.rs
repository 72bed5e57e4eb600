//! Persisted client session: access token and user profile.
//!
//! Stored as a small JSON file, the terminal equivalent of browser local
//! storage:
//!
//! ```json
//! {"accesstoken": "eyJ...", "user": {"name": "Asha", "email": "asha@example.com"}}
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SessionError;

/// Profile of the signed-in student. Unknown fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "accesstoken", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Display name of the signed-in user, if any
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref()?.name.as_deref()
    }
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session. A missing file is an empty session.
    pub async fn load(&self) -> Result<Session, SessionError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let json = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Current access token, if any
    pub async fn access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.load().await?.access_token)
    }
}
