//! dg-project: lighting configuration format, materials, and validation.

pub mod material;
pub mod schema;
pub mod validate;

pub use material::{GlassMaterial, MATERIAL_FILE_NAME, write_material_file};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Material error: {0}")]
    Material(#[from] dg_core::DgError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_config(path: &std::path::Path) -> ConfigResult<SceneConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SceneConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_config(path: &std::path::Path, config: &SceneConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
