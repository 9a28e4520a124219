//! Model import, cached per model/config revision.

use std::fs;
use std::path::{Path, PathBuf};

use dg_model::{HemisphericalView, import_model, load_model};
use dg_session::{CacheKey, ContentCache, SessionContext};
use dg_tools::ToolRunner;

use crate::error::{AppError, AppResult};

pub struct ModelImportRequest<'a> {
    /// External converter binary.
    pub converter: &'a Path,
    pub model_path: &'a Path,
    pub config_path: &'a Path,
}

#[derive(Debug, Clone)]
pub struct ModelImportResponse {
    pub model_json: PathBuf,
    pub loaded_from_cache: bool,
}

/// Convert (or reuse) the intermediate model document. Keyed on the model
/// file's identity and mtime plus the configuration's own key, so editing
/// either re-runs the converter.
pub fn ensure_model(
    session: &SessionContext,
    cache: &ContentCache,
    runner: &dyn ToolRunner,
    request: &ModelImportRequest,
) -> AppResult<ModelImportResponse> {
    if !request.model_path.exists() {
        return Err(AppError::MissingModelFile);
    }

    let config_key = CacheKey::for_file(request.config_path, &[])?;
    let converter = request.converter.to_string_lossy();
    let key = CacheKey::for_file(
        request.model_path,
        &[converter.as_ref(), config_key.as_str()],
    )?;

    if let Some(artifacts) = cache.lookup(&key)?
        && let Some(cached) = artifacts.first()
    {
        let name = cached.file_name().unwrap_or_default();
        let model_json = session.path(&name.to_string_lossy());
        fs::copy(cached, &model_json)?;
        tracing::debug!(key = key.as_str(), "reusing cached model import");
        return Ok(ModelImportResponse {
            model_json,
            loaded_from_cache: true,
        });
    }

    let model_json = import_model(
        runner,
        request.converter,
        request.model_path,
        request.config_path,
        session.workspace(),
    )?;
    cache.store(&key, &[&model_json])?;
    tracing::info!(model = %model_json.display(), "imported model");

    Ok(ModelImportResponse {
        model_json,
        loaded_from_cache: false,
    })
}

/// Named camera views of an imported model, fixed to the hemispherical
/// projection. An empty view list is a validation error: there is nothing
/// to render from.
pub fn list_views(model_json: &Path) -> AppResult<Vec<HemisphericalView>> {
    let document = load_model(model_json)?;
    let views = document.hemispherical_views();
    if views.is_empty() {
        return Err(dg_model::ModelError::NoNamedViews.into());
    }
    Ok(views)
}
