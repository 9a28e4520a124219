//! Glare evaluation and preview rendering.

use std::fs;
use std::path::{Path, PathBuf};

use dg_core::ComfortCategory;
use dg_session::{CacheKey, ContentCache, SessionContext};
use dg_tools::{ToolRunner, eval_hdr, hdr_to_gif};

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct GlareReport {
    pub hdr: PathBuf,
    /// Annotated check image written by the analysis tool.
    pub check_image: PathBuf,
    pub dgp: f64,
    pub category: ComfortCategory,
}

/// Evaluate an HDR rendering; always re-runs the analysis since it is the
/// step users iterate on.
pub fn evaluate_hdr(
    session: &SessionContext,
    runner: &dyn ToolRunner,
    evalglare: &Path,
    hdr: &Path,
) -> AppResult<GlareReport> {
    let evaluation = eval_hdr(runner, evalglare, hdr, session.workspace())?;
    Ok(GlareReport {
        hdr: hdr.to_path_buf(),
        dgp: evaluation.dgp(),
        category: evaluation.category,
        check_image: evaluation.check_image,
    })
}

/// Convert an evaluated HDR to its GIF preview, cached by the HDR's
/// identity and modification time.
pub fn render_preview(
    session: &SessionContext,
    cache: &ContentCache,
    runner: &dyn ToolRunner,
    ra_gif: &Path,
    hdr: &Path,
) -> AppResult<PathBuf> {
    let key = CacheKey::for_file(hdr, &["gif"])?;

    if let Some(artifacts) = cache.lookup(&key)?
        && let Some(cached) = artifacts.first()
    {
        let name = cached.file_name().unwrap_or_default();
        let gif = session.path(&name.to_string_lossy());
        fs::copy(cached, &gif)?;
        tracing::debug!(key = key.as_str(), "reusing cached preview");
        return Ok(gif);
    }

    let gif = hdr_to_gif(runner, ra_gif, hdr, session.workspace())?;
    cache.store(&key, &[&gif])?;
    Ok(gif)
}
