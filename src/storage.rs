use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{classify_io_error, SystemError};

/// Name of the state file inside the data directory
pub const STATE_FILE_NAME: &str = "state.json";

/// Everything the client remembers between launches
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Small key-value store for the anonymous user id and the last session id.
///
/// Backed by one pretty-printed JSON file. A missing or corrupt file starts
/// an empty store.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: StoredState,
}

impl SessionStore {
    /// Open the store in `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SystemError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| classify_io_error(e, dir.to_path_buf(), "create"))?;
        }

        let path = dir.join(STATE_FILE_NAME);
        let state = match load_state(&path) {
            Ok(state) => state,
            Err(err @ SystemError::CorruptState { .. }) => {
                warn!(error = %err, "Starting with an empty session store");
                StoredState::default()
            }
            Err(err) => return Err(err),
        };

        Ok(Self { path, state })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The anonymous user id, created and saved on first use.
    ///
    /// If saving fails the id is still returned and kept for this process.
    pub fn user_id(&mut self) -> String {
        if let Some(id) = &self.state.user_id {
            return id.clone();
        }

        let id = Uuid::new_v4().to_string();
        self.state.user_id = Some(id.clone());
        if let Err(err) = self.save() {
            warn!(error = %err, "Could not persist user id; using an ephemeral one");
        }
        id
    }

    /// The session to continue, if any
    pub fn session_id(&self) -> Option<&str> {
        self.state.session_id.as_deref()
    }

    pub fn save_session_id(&mut self, session_id: &str) -> Result<(), SystemError> {
        self.state.session_id = Some(session_id.to_string());
        self.save()
    }

    /// Forget the current session so the next message starts a new one
    pub fn clear_session(&mut self) -> Result<(), SystemError> {
        self.state.session_id = None;
        self.save()
    }

    /// Forget everything, including the user id
    pub fn clear_all(&mut self) -> Result<(), SystemError> {
        self.state = StoredState::default();
        self.save()
    }

    fn save(&self) -> Result<(), SystemError> {
        let json =
            serde_json::to_string_pretty(&self.state).map_err(|e| SystemError::IoError {
                operation: "serialize".to_string(),
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        fs::write(&self.path, json).map_err(|e| classify_io_error(e, self.path.clone(), "write"))?;
        debug!(path = %self.path.display(), "Saved session store");
        Ok(())
    }
}

fn load_state(path: &Path) -> Result<StoredState, SystemError> {
    if !path.exists() {
        return Ok(StoredState::default());
    }

    let json =
        fs::read_to_string(path).map_err(|e| classify_io_error(e, path.to_path_buf(), "read"))?;
    serde_json::from_str(&json).map_err(|e| SystemError::CorruptState {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
