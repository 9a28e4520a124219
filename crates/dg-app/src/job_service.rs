//! Job submission, status polling, and output retrieval.
//!
//! Each function is one synchronous pass: submission uploads and creates,
//! status asks once, retrieval downloads once (through the cache). There
//! is no background polling and no automatic retry; the caller decides
//! when to ask again.

use std::path::{Path, PathBuf};

use dg_cloud::{ApiClient, JobRef, RecipeRef, SimulationSpec};
use dg_core::SimStatus;
use dg_session::{CacheKey, ContentCache, SessionContext};

use crate::error::AppResult;
use crate::settings::CloudSettings;

/// Folder name extracted results land under inside a cache entry.
const RESULTS_FOLDER: &str = "results";

pub struct SubmitRequest<'a> {
    pub settings: &'a CloudSettings,
    pub model_json: &'a Path,
    pub sky: String,
    pub name: String,
    pub description: String,
}

fn client_for(settings: &CloudSettings) -> AppResult<ApiClient> {
    let api_key = settings.resolve_api_key()?;
    Ok(ApiClient::new(&settings.base_url, &api_key)?)
}

/// Upload the model artifact, create the job, and remember its URL on the
/// session.
pub fn submit(session: &mut SessionContext, request: &SubmitRequest) -> AppResult<JobRef> {
    let settings = request.settings;
    let client = client_for(settings)?;

    let model_artifact = dg_cloud::upload_artifact(
        &client,
        &settings.owner,
        &settings.project,
        request.model_json,
    )?;

    let spec = SimulationSpec {
        recipe: RecipeRef {
            owner: settings.recipe.owner.clone(),
            name: settings.recipe.name.clone(),
            tag: settings.recipe.tag.clone(),
        },
        name: request.name.clone(),
        description: request.description.clone(),
        model_artifact,
        sky: request.sky.clone(),
    };

    let job = dg_cloud::submit_job(&client, &settings.owner, &settings.project, &spec)?;
    session.job_url = Some(job.url(&settings.base_url));
    Ok(job)
}

/// Single-shot status check for a stored job URL. With no job submitted
/// yet the answer is `NotStarted`, not an error.
pub fn request_status(settings: &CloudSettings, job_url: Option<&str>) -> AppResult<SimStatus> {
    let Some(url) = job_url else {
        return Ok(SimStatus::NotStarted);
    };
    let job = JobRef::parse_url(url)?;
    let client = client_for(settings)?;
    Ok(dg_cloud::fetch_status(&client, &job)?)
}

/// Download and unpack one named output of a finished job, cached by the
/// job URL and output name so repeated fetches reuse the bundle.
pub fn fetch_outputs(
    cache: &ContentCache,
    settings: &CloudSettings,
    job_url: &str,
    output_name: &str,
) -> AppResult<PathBuf> {
    let job = JobRef::parse_url(job_url)?;
    let key = CacheKey::for_params(&[job_url, output_name]);

    if let Some(artifacts) = cache.lookup(&key)?
        && let Some(folder) = artifacts.first()
    {
        tracing::debug!(key = key.as_str(), "reusing downloaded output bundle");
        return Ok(folder.clone());
    }

    let client = client_for(settings)?;
    let staging = cache.begin(&key)?;
    let output_folder =
        dg_cloud::download_zipped_output(&client, &job, output_name, &staging, RESULTS_FOLDER)?;
    cache.commit(&key, &[RESULTS_FOLDER])?;

    Ok(output_folder)
}
