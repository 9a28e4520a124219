//! External model-converter invocation.

use std::path::{Path, PathBuf};

use dg_tools::{ToolCommand, ToolRunner};

use crate::schema::ModelDocument;
use crate::{ModelError, ModelResult};

/// Convert a CAD model into the intermediate JSON document.
///
/// The converter receives the model path, the scene configuration, and an
/// output path; it owns all geometry handling. Returns the written JSON
/// path.
pub fn import_model(
    runner: &dyn ToolRunner,
    converter: &Path,
    model_path: &Path,
    config_path: &Path,
    target_dir: &Path,
) -> ModelResult<PathBuf> {
    if !model_path.exists() {
        return Err(ModelError::ModelFileMissing {
            path: model_path.to_path_buf(),
        });
    }

    let stem = model_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    let output_path = target_dir.join(format!("{stem}.json"));

    let command = ToolCommand::new(converter)
        .arg(model_path.to_string_lossy())
        .arg("--config")
        .arg(config_path.to_string_lossy())
        .arg("--output")
        .arg(output_path.to_string_lossy());
    runner.run_checked(&command)?;

    Ok(output_path)
}

/// Parse a previously written model document.
pub fn load_model(path: &Path) -> ModelResult<ModelDocument> {
    let content = std::fs::read_to_string(path)?;
    let document: ModelDocument = serde_json::from_str(&content)?;
    Ok(document)
}
