//! Cloud settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Environment variable consulted when the settings file carries no key.
pub const API_KEY_ENV: &str = "DAYGLARE_API_KEY";

/// Connection and project coordinates for the job service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloudSettings {
    pub base_url: String,
    pub owner: String,
    pub project: String,
    /// Prefer the environment variable for credentials; this field exists
    /// for throwaway setups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub recipe: RecipeSettings,
}

/// Identity of the rendering recipe to run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSettings {
    pub owner: String,
    pub name: String,
    pub tag: String,
}

impl Default for RecipeSettings {
    fn default() -> Self {
        Self {
            owner: "ladybug-tools".to_string(),
            name: "point-in-time-view".to_string(),
            tag: "latest".to_string(),
        }
    }
}

impl CloudSettings {
    /// The API key from the settings file, falling back to the
    /// environment. Absence is a validation error, not a panic.
    pub fn resolve_api_key(&self) -> AppResult<String> {
        if let Some(key) = &self.api_key
            && !key.trim().is_empty()
        {
            return Ok(key.clone());
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::MissingApiKey),
        }
    }
}

/// Load settings from a YAML file.
pub fn load_settings(path: &Path) -> AppResult<CloudSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::SettingsFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let settings: CloudSettings = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Settings(format!("Failed to parse settings YAML: {}", e)))?;

    if settings.base_url.trim().is_empty() {
        return Err(AppError::Settings("base_url must not be empty".to_string()));
    }
    if settings.owner.trim().is_empty() || settings.project.trim().is_empty() {
        return Err(AppError::Settings(
            "owner and project must not be empty".to_string(),
        ));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_settings_with_default_recipe() {
        let settings: CloudSettings = serde_yaml::from_str(
            "base_url: https://cloud.example.com\nowner: acme\nproject: demo\n",
        )
        .unwrap();
        assert_eq!(settings.owner, "acme");
        assert_eq!(settings.recipe, RecipeSettings::default());
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn file_key_wins_over_environment() {
        let settings = CloudSettings {
            base_url: "https://cloud.example.com".to_string(),
            owner: "acme".to_string(),
            project: "demo".to_string(),
            api_key: Some("file-key".to_string()),
            recipe: RecipeSettings::default(),
        };
        assert_eq!(settings.resolve_api_key().unwrap(), "file-key");
    }

    #[test]
    fn blank_file_key_is_not_a_key() {
        let settings = CloudSettings {
            base_url: "https://cloud.example.com".to_string(),
            owner: "acme".to_string(),
            project: "demo".to_string(),
            api_key: Some("   ".to_string()),
            recipe: RecipeSettings::default(),
        };
        // With the env var also unset this must be the validation error.
        if std::env::var(API_KEY_ENV).is_err() {
            assert!(matches!(
                settings.resolve_api_key(),
                Err(AppError::MissingApiKey)
            ));
        }
    }
}
