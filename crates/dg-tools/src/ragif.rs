//! HDR to animated GIF conversion via the external `ra_gif` binary.

use std::path::{Path, PathBuf};

use crate::command::{ToolCommand, ToolRunner};
use crate::ToolResult;

/// Convert an HDR image to a GIF preview next to it in `target_dir`.
/// Returns the GIF path.
pub fn hdr_to_gif(
    runner: &dyn ToolRunner,
    binary: &Path,
    hdr_path: &Path,
    target_dir: &Path,
) -> ToolResult<PathBuf> {
    let stem = hdr_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "preview".to_string());
    let gif_path = target_dir.join(format!("{stem}.gif"));

    let command = ToolCommand::new(binary)
        .arg(hdr_path.to_string_lossy())
        .arg(gif_path.to_string_lossy());
    runner.run_checked(&command)?;

    tracing::debug!(gif = %gif_path.display(), "converted HDR to GIF");
    Ok(gif_path)
}
