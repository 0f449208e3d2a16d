//! Persisted session state: the job, target, profile and task order that
//! commands fall back to when arguments are omitted.
//!
//! The session file lives at `~/.config/bricks/session.yml`. It is a flat
//! YAML mapping owned entirely by this tool; the stored task order is
//! overwritten wholesale every time `current` runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SESSION_FILE: &str = "~/.config/bricks/session.yml";

/// The remembered session fields. All fields are unset until the first
/// `set`/`current`; `merge_update` only ever overwrites fields that are
/// present in the update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Most recent resolved task order, in execution order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid session state: {0}")]
    Unreadable(#[from] serde_yaml::Error),
}

/// File-backed store for [`SessionState`].
///
/// The backing path is injectable so tests can point the store at a temp
/// directory instead of the user's config.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the fixed user-scoped location.
    pub fn open_default() -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(SESSION_FILE).to_string()),
        }
    }

    /// Store at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted state.
    ///
    /// A missing or empty file is the all-unset state, not an error. A file
    /// that exists but does not parse is reported rather than silently
    /// replaced with partial values.
    pub fn load(&self) -> Result<SessionState, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(SessionState::default()),
            Ok(content) => Ok(serde_yaml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionState::default()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }

    /// Alias for [`load`](Self::load), used for read-only queries.
    pub fn current(&self) -> Result<SessionState, SessionError> {
        self.load()
    }

    /// Overwrite the fields present in `update`, leaving the rest as stored.
    ///
    /// Creates the parent directory on first write. Last writer wins; there
    /// is no cross-process locking.
    pub fn merge_update(&self, update: &SessionState) -> Result<SessionState, SessionError> {
        let mut state = self.load()?;

        if let Some(jobname) = &update.jobname {
            state.jobname = Some(jobname.clone());
        }
        if let Some(target) = &update.target {
            state.target = Some(target.clone());
        }
        if let Some(profile) = &update.profile {
            state.profile = Some(profile.clone());
        }
        if let Some(tasks) = &update.tasks {
            state.tasks = Some(tasks.clone());
        }

        self.save(&state)?;
        Ok(state)
    }

    fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(state)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
