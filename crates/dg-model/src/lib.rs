//! dg-model: intermediate model representation and import.
//!
//! The proprietary CAD file itself is never parsed here; an external
//! converter turns it into the JSON document this crate reads. This crate
//! owns the document schema, the converter invocation, and the extraction
//! of named camera views for rendering.

pub mod import;
pub mod schema;

pub use import::{import_model, load_model};
pub use schema::{HemisphericalView, ModelDocument, NamedView};

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("Model file not found: {path}")]
    ModelFileMissing { path: std::path::PathBuf },

    #[error("Model import failed: {0}")]
    Import(#[from] dg_tools::ToolError),

    #[error("Model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model has no named views")]
    NoNamedViews,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
