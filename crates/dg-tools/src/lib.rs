//! dg-tools: narrow interface to the external radiance binaries.
//!
//! Every invocation goes through [`ToolRunner`], which returns a
//! structured [`ToolOutput`] so failure handling stays explicit and the
//! wrappers are testable without the binaries installed.

pub mod command;
pub mod evalglare;
pub mod ragif;

pub use command::{SystemRunner, ToolCommand, ToolOutput, ToolRunner};
pub use evalglare::{GlareEvaluation, eval_hdr};
pub use ragif::hdr_to_gif;

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' failed with exit code {code}: {stderr}")]
    Failed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("'{program}' was terminated by a signal")]
    Terminated { program: String },

    #[error("'{program}' produced no parseable output")]
    EmptyOutput { program: String },

    #[error("Failed to parse '{program}' output: {what}")]
    Parse { program: String, what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
