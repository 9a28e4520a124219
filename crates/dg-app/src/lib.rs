//! Shared application service layer for dayglare.
//!
//! This crate provides a unified interface for frontends, centralizing
//! the workflow logic: configuration building, model import, sky
//! derivation, job submission and polling, artifact retrieval, and glare
//! evaluation.

pub mod config_service;
pub mod error;
pub mod glare_service;
pub mod job_service;
pub mod model_service;
pub mod settings;
pub mod sky_service;

// Re-export key types for convenience
pub use config_service::{SceneConfigRequest, SceneConfigResponse, ensure_scene_config};
pub use error::{AppError, AppResult};
pub use glare_service::{GlareReport, evaluate_hdr, render_preview};
pub use job_service::{SubmitRequest, fetch_outputs, request_status, submit};
pub use model_service::{ModelImportRequest, ModelImportResponse, ensure_model, list_views};
pub use settings::{CloudSettings, RecipeSettings, load_settings};
pub use sky_service::{SkyResponse, derive_sky};
