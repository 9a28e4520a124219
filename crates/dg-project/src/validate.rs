//! Configuration validation logic.

use crate::schema::{LayerRole, SceneConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Layer '{layer}' is listed as both glass and ignored")]
    OverlappingLayer { layer: String },

    #[error("Empty layer name in {context}")]
    EmptyLayerName { context: String },

    #[error("Layer '{layer}' references an empty material name")]
    EmptyMaterialName { layer: String },

    #[error("Configuration has no radiance material source")]
    MissingMaterialSource,
}

pub fn validate_config(config: &SceneConfig) -> Result<(), ValidationError> {
    if config.sources.radiance_material.trim().is_empty() {
        return Err(ValidationError::MissingMaterialSource);
    }

    for (name, role) in &config.layers {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyLayerName {
                context: "layers".to_string(),
            });
        }
        if let LayerRole::Aperture {
            radiance_material, ..
        } = role
            && radiance_material.trim().is_empty()
        {
            return Err(ValidationError::EmptyMaterialName {
                layer: name.clone(),
            });
        }
    }

    Ok(())
}
