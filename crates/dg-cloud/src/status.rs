//! Remote job states and their mapping to the local status enumeration.

use dg_core::SimStatus;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::job::JobRef;
use crate::CloudResult;

/// The job service's richer state set. Unrecognized states deserialize to
/// `Unknown` so the mapping below stays total as the service evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteStatus {
    Created,
    PreProcessing,
    Running,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl RemoteStatus {
    /// Collapse to the local four-valued status: anything that is neither
    /// terminal-failed, terminal-cancelled, nor finished counts as
    /// incomplete.
    pub fn to_sim_status(self) -> SimStatus {
        match self {
            RemoteStatus::Created
            | RemoteStatus::PreProcessing
            | RemoteStatus::Running
            | RemoteStatus::Unknown => SimStatus::Incomplete,
            RemoteStatus::Failed => SimStatus::Failed,
            RemoteStatus::Cancelled => SimStatus::Cancelled,
            RemoteStatus::Completed => SimStatus::Complete,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusInfo {
    pub status: RemoteStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub status: JobStatusInfo,
}

/// Single-shot status request; callers decide when to ask again.
pub fn fetch_status(client: &ApiClient, job: &JobRef) -> CloudResult<SimStatus> {
    let response: JobStatusResponse = client.get_json(&format!(
        "projects/{}/{}/jobs/{}",
        job.owner, job.project, job.id
    ))?;
    let status = response.status.status.to_sim_status();
    tracing::debug!(job = %job.id, %status, "fetched job status");
    Ok(status)
}
