//! dg-cloud: client for the remote job-execution service.
//!
//! Submission, status polling, and artifact retrieval are separate
//! single-shot calls keyed by owner/project/job id. Nothing here retries;
//! recovery is always caller-initiated.

pub mod client;
pub mod download;
pub mod job;
pub mod status;

pub use client::ApiClient;
pub use download::download_zipped_output;
pub use job::{JobRef, RecipeRef, SimulationSpec, submit_job, upload_artifact};
pub use status::{RemoteStatus, fetch_status};

pub type CloudResult<T> = Result<T, CloudError>;

#[derive(thiserror::Error, Debug)]
pub enum CloudError {
    #[error("No API key provided")]
    MissingApiKey,

    #[error("API key contains invalid characters")]
    InvalidApiKey,

    #[error("Malformed job reference: '{url}'")]
    MalformedJobReference { url: String },

    #[error("Artifact path has no file name: {path}")]
    InvalidArtifactPath { path: std::path::PathBuf },

    #[error("Job service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Job {job} has no runs to download from")]
    NoRuns { job: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
