//! Scene configuration schema.
//!
//! The configuration JSON tells the model importer what to do with each
//! named layer: treat it as a glazing aperture bound to a radiance
//! material, or drop it from the import entirely.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::material::GlassMaterial;
use crate::validate::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    pub sources: MaterialSources,
    #[serde(default)]
    pub layers: BTreeMap<String, LayerRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialSources {
    pub radiance_material: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum LayerRole {
    Aperture {
        radiance_material: String,
        include_child_layers: bool,
    },
    Ignore {
        include_child_layers: bool,
    },
}

impl SceneConfig {
    /// Build a configuration from disjoint glass and ignore layer sets.
    ///
    /// A layer named in both sets is rejected: the two roles are mutually
    /// exclusive and no insertion-order tiebreak is applied.
    pub fn build(
        glass_layers: &[String],
        ignore_layers: &[String],
        material: &GlassMaterial,
        material_file: &Path,
    ) -> Result<Self, ValidationError> {
        for name in glass_layers {
            if ignore_layers.contains(name) {
                return Err(ValidationError::OverlappingLayer { layer: name.clone() });
            }
        }

        let mut layers = BTreeMap::new();
        for name in glass_layers {
            layers.insert(
                name.clone(),
                LayerRole::Aperture {
                    radiance_material: material.name(),
                    include_child_layers: true,
                },
            );
        }
        for name in ignore_layers {
            layers.insert(
                name.clone(),
                LayerRole::Ignore {
                    include_child_layers: false,
                },
            );
        }

        let config = Self {
            sources: MaterialSources {
                radiance_material: material_file.to_string_lossy().into_owned(),
            },
            layers,
        };
        crate::validate::validate_config(&config)?;
        Ok(config)
    }
}
