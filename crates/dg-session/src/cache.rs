//! Content-addressed artifact cache.
//!
//! Entries are keyed by a sha256 over the inputs that produced them: for
//! local derivations, the source path and its modification time plus the
//! parameters; for remote artifacts, the parameters alone. A changed
//! input yields a new key, so invalidation is either implicit (key moves)
//! or explicit (`invalidate`/`clear`).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{SessionError, SessionResult};

const CACHE_DIR_NAME: &str = ".cache";
const MANIFEST_NAME: &str = "manifest.json";

/// Opaque cache key; construction is the only way to get one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for an artifact derived from a local file: path identity,
    /// modification time, and the parameter strings all feed the hash.
    pub fn for_file(input: &Path, params: &[&str]) -> SessionResult<Self> {
        let metadata = fs::metadata(input)?;
        let modified = metadata.modified()?;
        let nanos = modified
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        let mut hasher = Sha256::new();
        hasher.update(input.to_string_lossy().as_bytes());
        hasher.update(nanos.to_le_bytes());
        for param in params {
            hasher.update([0u8]);
            hasher.update(param.as_bytes());
        }
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    /// Key for an artifact identified by parameters alone, e.g. a remote
    /// download keyed by job URL and output name.
    pub fn for_params(params: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for param in params {
            hasher.update([0u8]);
            hasher.update(param.as_bytes());
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub created_at: String,
    pub artifacts: Vec<String>,
}

/// Directory-backed cache living inside a session workspace.
#[derive(Debug, Clone)]
pub struct ContentCache {
    root_dir: PathBuf,
}

impl ContentCache {
    pub fn new(root_dir: PathBuf) -> SessionResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Cache under `<workspace>/.cache`.
    pub fn for_workspace(workspace: &Path) -> SessionResult<Self> {
        Self::new(workspace.join(CACHE_DIR_NAME))
    }

    fn entry_dir(&self, key: &CacheKey) -> PathBuf {
        self.root_dir.join(key.as_str())
    }

    fn manifest_path(&self, key: &CacheKey) -> PathBuf {
        self.entry_dir(key).join(MANIFEST_NAME)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.manifest_path(key).exists()
    }

    /// Paths of a cached entry's artifacts, or None on a miss.
    pub fn lookup(&self, key: &CacheKey) -> SessionResult<Option<Vec<PathBuf>>> {
        let manifest_path = self.manifest_path(key);
        if !manifest_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(manifest_path)?;
        let entry: CacheEntry = serde_json::from_str(&content)?;
        let dir = self.entry_dir(key);
        Ok(Some(
            entry.artifacts.iter().map(|name| dir.join(name)).collect(),
        ))
    }

    /// Copy artifacts into the entry and write its manifest. Re-storing
    /// under an existing key replaces the entry.
    pub fn store(&self, key: &CacheKey, artifacts: &[&Path]) -> SessionResult<Vec<PathBuf>> {
        let dir = self.entry_dir(key);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;

        let mut names = Vec::with_capacity(artifacts.len());
        let mut stored = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let name = artifact
                .file_name()
                .ok_or_else(|| SessionError::InvalidPath {
                    message: format!("artifact '{}' has no file name", artifact.display()),
                })?
                .to_string_lossy()
                .into_owned();
            let dest = dir.join(&name);
            fs::copy(artifact, &dest)?;
            names.push(name);
            stored.push(dest);
        }

        let entry = CacheEntry {
            key: key.as_str().to_string(),
            created_at: Utc::now().to_rfc3339(),
            artifacts: names,
        };
        let manifest = serde_json::to_string_pretty(&entry)?;
        fs::write(self.manifest_path(key), manifest)?;
        Ok(stored)
    }

    /// Start populating an entry in place: the returned directory is
    /// fresh and owned by the caller until [`ContentCache::commit`] seals
    /// it. An entry without a manifest is never reported as cached, so an
    /// abandoned `begin` leaves no half-entry behind a hit.
    pub fn begin(&self, key: &CacheKey) -> SessionResult<PathBuf> {
        let dir = self.entry_dir(key);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Seal an entry begun with [`ContentCache::begin`], naming the
    /// artifacts (files or directories) inside it.
    pub fn commit(&self, key: &CacheKey, artifacts: &[&str]) -> SessionResult<()> {
        let dir = self.entry_dir(key);
        for artifact in artifacts {
            if !dir.join(artifact).exists() {
                return Err(SessionError::InvalidPath {
                    message: format!("artifact '{artifact}' missing from entry {}", key.as_str()),
                });
            }
        }
        let entry = CacheEntry {
            key: key.as_str().to_string(),
            created_at: Utc::now().to_rfc3339(),
            artifacts: artifacts.iter().map(|s| s.to_string()).collect(),
        };
        let manifest = serde_json::to_string_pretty(&entry)?;
        fs::write(self.manifest_path(key), manifest)?;
        Ok(())
    }

    /// Drop one entry; absent keys are a no-op.
    pub fn invalidate(&self, key: &CacheKey) -> SessionResult<()> {
        let dir = self.entry_dir(key);
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&self) -> SessionResult<()> {
        if self.root_dir.exists() {
            fs::remove_dir_all(&self.root_dir)?;
        }
        fs::create_dir_all(&self.root_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_order_and_content_change_the_key() {
        let a = CacheKey::for_params(&["glass", "0.6"]);
        let b = CacheKey::for_params(&["0.6", "glass"]);
        let c = CacheKey::for_params(&["glass", "0.6"]);
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn param_boundaries_are_unambiguous() {
        // "ab" + "c" must not collide with "a" + "bc".
        let a = CacheKey::for_params(&["ab", "c"]);
        let b = CacheKey::for_params(&["a", "bc"]);
        assert_ne!(a, b);
    }
}
