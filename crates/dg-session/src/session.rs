//! Session working directory lifecycle.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::SessionResult;

/// Prefix for session working directories under the OS temp dir.
const SESSION_DIR_PREFIX: &str = "viz_analytics";

/// One user session's mutable state: a unique, exclusively-owned working
/// directory plus the references accumulated while walking the workflow.
///
/// Nothing outlives the session; `cleanup` removes the directory and with
/// it every artifact derived along the way.
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: Uuid,
    host: String,
    root: PathBuf,
    created_at: DateTime<Utc>,
    /// Uploaded model file, once the user provides one.
    pub model_file: Option<PathBuf>,
    /// Weather file backing the sky derivation.
    pub weather_file: Option<PathBuf>,
    /// URL of the submitted job, if any.
    pub job_url: Option<String>,
}

impl SessionContext {
    /// Create a fresh session with its own working directory under the OS
    /// temp dir.
    pub fn create(host: &str) -> SessionResult<Self> {
        let id = Uuid::new_v4();
        let root = std::env::temp_dir().join(format!("{SESSION_DIR_PREFIX}_{host}_{id}"));
        Self::at(host, id, root)
    }

    /// Open a session rooted at a caller-chosen directory (created if
    /// absent). Used when the working directory must survive the process,
    /// e.g. across CLI invocations of one workflow.
    pub fn open(host: &str, root: PathBuf) -> SessionResult<Self> {
        Self::at(host, Uuid::new_v4(), root)
    }

    fn at(host: &str, id: Uuid, root: PathBuf) -> SessionResult<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            id,
            host: host.to_string(),
            root,
            created_at: Utc::now(),
            model_file: None,
            weather_file: None,
            job_url: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The session's working directory; all derived artifacts land here.
    pub fn workspace(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Remove the working directory and everything in it.
    pub fn cleanup(self) -> SessionResult<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}
