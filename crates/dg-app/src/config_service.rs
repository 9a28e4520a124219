//! Lighting configuration building, cached per input set.

use std::fs;
use std::path::{Path, PathBuf};

use dg_project::{GlassMaterial, SceneConfig, save_config, write_material_file};
use dg_session::{CacheKey, ContentCache, SessionContext};

use crate::error::AppResult;

/// File name the scene configuration is written under.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub struct SceneConfigRequest<'a> {
    /// Line-oriented base material definitions to append the glass to.
    pub reference_material: &'a Path,
    pub glass_layers: &'a [String],
    pub ignore_layers: &'a [String],
    pub transmittance: f64,
}

#[derive(Debug, Clone)]
pub struct SceneConfigResponse {
    pub material_path: PathBuf,
    pub config_path: PathBuf,
    pub material_name: String,
    pub loaded_from_cache: bool,
}

/// Write (or reuse) the material file and scene configuration for one
/// input set. The cache key covers the reference material's identity and
/// modification time plus every layer name and the transmittance, so any
/// changed input produces a fresh pair.
pub fn ensure_scene_config(
    session: &SessionContext,
    cache: &ContentCache,
    request: &SceneConfigRequest,
) -> AppResult<SceneConfigResponse> {
    let material = GlassMaterial::new(request.transmittance)?;

    let mut params: Vec<String> = Vec::new();
    for layer in request.glass_layers {
        params.push(format!("glass={layer}"));
    }
    for layer in request.ignore_layers {
        params.push(format!("ignore={layer}"));
    }
    params.push(format!("transmittance={}", request.transmittance));
    let param_refs: Vec<&str> = params.iter().map(String::as_str).collect();
    let key = CacheKey::for_file(request.reference_material, &param_refs)?;

    let material_path = session.path(dg_project::MATERIAL_FILE_NAME);
    let config_path = session.path(CONFIG_FILE_NAME);

    if let Some(artifacts) = cache.lookup(&key)? {
        for artifact in &artifacts {
            let name = artifact.file_name().unwrap_or_default();
            fs::copy(artifact, session.path(&name.to_string_lossy()))?;
        }
        tracing::debug!(key = key.as_str(), "reusing cached scene configuration");
        return Ok(SceneConfigResponse {
            material_path,
            config_path,
            material_name: material.name(),
            loaded_from_cache: true,
        });
    }

    let written_material =
        write_material_file(request.reference_material, &material, session.workspace())?;
    let config = SceneConfig::build(
        request.glass_layers,
        request.ignore_layers,
        &material,
        &written_material,
    )
    .map_err(dg_project::ConfigError::from)?;
    save_config(&config_path, &config)?;

    cache.store(&key, &[&written_material, &config_path])?;
    tracing::info!(
        material = material.name(),
        layers = request.glass_layers.len() + request.ignore_layers.len(),
        "wrote scene configuration"
    );

    Ok(SceneConfigResponse {
        material_path: written_material,
        config_path,
        material_name: material.name(),
        loaded_from_cache: false,
    })
}
