//! Zipped result-bundle retrieval.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::client::ApiClient;
use crate::job::JobRef;
use crate::{CloudError, CloudResult};

#[derive(Debug, Deserialize)]
struct RunList {
    resources: Vec<RunInfo>,
}

#[derive(Debug, Deserialize)]
struct RunInfo {
    id: String,
}

/// Download and unpack one named output of a finished job.
///
/// The destination `<target_folder>/<folder_name>` is recreated from
/// scratch on every call so a re-download never mixes with stale files.
/// The output is taken from the job's first run. Returns the folder the
/// archive was extracted into.
pub fn download_zipped_output(
    client: &ApiClient,
    job: &JobRef,
    output_name: &str,
    target_folder: &Path,
    folder_name: &str,
) -> CloudResult<PathBuf> {
    let output_folder = target_folder.join(folder_name);
    if output_folder.exists() {
        fs::remove_dir_all(&output_folder)?;
    }
    fs::create_dir_all(&output_folder)?;

    let runs: RunList = client.get_json(&format!(
        "projects/{}/{}/jobs/{}/runs",
        job.owner, job.project, job.id
    ))?;
    let run = runs.resources.first().ok_or_else(|| CloudError::NoRuns {
        job: job.id.clone(),
    })?;

    let bytes = client.get_bytes(&format!(
        "projects/{}/{}/runs/{}/outputs/{}",
        job.owner, job.project, run.id, output_name
    ))?;

    tracing::info!(
        job = %job.id,
        output = output_name,
        bytes = bytes.len(),
        "downloaded zipped output"
    );

    extract_zip(&bytes, &output_folder)?;
    Ok(output_folder)
}

/// Unpack a zip archive held in memory into `output_folder`.
fn extract_zip(bytes: &[u8], output_folder: &Path) -> CloudResult<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    archive.extract(output_folder)?;
    Ok(())
}
