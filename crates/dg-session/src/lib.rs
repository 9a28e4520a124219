//! dg-session: per-session working directory and artifact cache.

pub mod cache;
pub mod session;

pub use cache::{CacheEntry, CacheKey, ContentCache};
pub use session::SessionContext;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Cache entry not found: {key}")]
    EntryNotFound { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
