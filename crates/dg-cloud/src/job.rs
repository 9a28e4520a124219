//! Job references, simulation parameters, and submission.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::{CloudError, CloudResult};

/// Metric the rendering recipe evaluates.
pub const METRIC: &str = "luminance";
/// Output image resolution in pixels.
pub const RESOLUTION: u32 = 800;
/// Radiance ambient parameter flags for the point-in-time render.
pub const RADIANCE_PARAMETERS: &str = "-ab 2 -aa 0.25 -ad 512 -ar 16";

/// Identifies one remote simulation by owner, project, and job id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRef {
    pub owner: String,
    pub project: String,
    pub id: String,
}

impl JobRef {
    /// Rebuild a reference from a stored job URL of the shape
    /// `.../<owner>/projects/<project>/studies/<id>`.
    ///
    /// Anything that does not match those fixed positional segments is a
    /// malformed reference, never an out-of-bounds index.
    pub fn parse_url(url: &str) -> CloudResult<Self> {
        let malformed = || CloudError::MalformedJobReference {
            url: url.to_string(),
        };

        let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 5 {
            return Err(malformed());
        }

        let id = segments[segments.len() - 1];
        let studies = segments[segments.len() - 2];
        let project = segments[segments.len() - 3];
        let projects = segments[segments.len() - 4];
        let owner = segments[segments.len() - 5];

        if studies != "studies" || projects != "projects" {
            return Err(malformed());
        }
        if id.is_empty() || project.is_empty() || owner.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            owner: owner.to_string(),
            project: project.to_string(),
            id: id.to_string(),
        })
    }

    /// Render the canonical URL under `base`.
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}/{}/projects/{}/studies/{}",
            base.trim_end_matches('/'),
            self.owner,
            self.project,
            self.id
        )
    }
}

/// Identity of the rendering recipe to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub owner: String,
    pub name: String,
    pub tag: String,
}

/// Everything a submission needs besides the project coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSpec {
    pub recipe: RecipeRef,
    pub name: String,
    pub description: String,
    /// Remote path of the uploaded model artifact.
    pub model_artifact: String,
    /// Climate-based sky description string.
    pub sky: String,
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    recipe: &'a RecipeRef,
    name: &'a str,
    description: &'a str,
    arguments: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    path: String,
}

impl SimulationSpec {
    /// The recipe argument set: uploaded model, sky, and the fixed
    /// rendering parameters.
    pub fn arguments(&self) -> serde_json::Value {
        serde_json::json!({
            "model": self.model_artifact,
            "sky": self.sky,
            "metric": METRIC,
            "resolution": RESOLUTION,
            "radiance-parameters": RADIANCE_PARAMETERS,
        })
    }
}

/// Upload a local artifact into the project; returns its remote path.
pub fn upload_artifact(
    client: &ApiClient,
    owner: &str,
    project: &str,
    path: &Path,
) -> CloudResult<String> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CloudError::InvalidArtifactPath {
            path: path.to_path_buf(),
        })?;
    let bytes = std::fs::read(path)?;

    let response: UploadResponse = client.put_bytes(
        &format!("projects/{owner}/{project}/artifacts/{file_name}"),
        bytes,
    )?;
    tracing::info!(artifact = %response.path, "uploaded model artifact");
    Ok(response.path)
}

/// Create the job on the service; returns its reference.
pub fn submit_job(
    client: &ApiClient,
    owner: &str,
    project: &str,
    spec: &SimulationSpec,
) -> CloudResult<JobRef> {
    let body = SubmitBody {
        recipe: &spec.recipe,
        name: &spec.name,
        description: &spec.description,
        arguments: vec![spec.arguments()],
    };
    let response: SubmitResponse =
        client.post_json(&format!("projects/{owner}/{project}/jobs"), &body)?;

    tracing::info!(job = %response.id, "submitted simulation job");
    Ok(JobRef {
        owner: owner.to_string(),
        project: project.to_string(),
        id: response.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_positional_segments() {
        let job = JobRef::parse_url(
            "https://cloud.example.com/acme/projects/demo/studies/9f1b2c",
        )
        .unwrap();
        assert_eq!(job.owner, "acme");
        assert_eq!(job.project, "demo");
        assert_eq!(job.id, "9f1b2c");
    }

    #[test]
    fn parse_survives_trailing_slash() {
        let job =
            JobRef::parse_url("https://cloud.example.com/acme/projects/demo/studies/9f1b2c/")
                .unwrap();
        assert_eq!(job.id, "9f1b2c");
    }

    #[test]
    fn malformed_references_are_explicit_errors() {
        for url in [
            "",
            "https://cloud.example.com",
            "https://cloud.example.com/acme/projects/demo",
            "acme/demo/studies/9f1b2c",
            "https://cloud.example.com/acme/teams/demo/studies/9f1b2c",
            "https://cloud.example.com/acme/projects/demo/runs/9f1b2c",
        ] {
            let err = JobRef::parse_url(url).unwrap_err();
            assert!(
                matches!(err, CloudError::MalformedJobReference { .. }),
                "expected malformed reference for '{url}'"
            );
        }
    }

    #[test]
    fn url_roundtrips_through_parse() {
        let job = JobRef {
            owner: "acme".to_string(),
            project: "demo".to_string(),
            id: "9f1b2c".to_string(),
        };
        let url = job.url("https://cloud.example.com/");
        assert_eq!(
            url,
            "https://cloud.example.com/acme/projects/demo/studies/9f1b2c"
        );
        assert_eq!(JobRef::parse_url(&url).unwrap(), job);
    }

    #[test]
    fn arguments_carry_fixed_parameters() {
        let spec = SimulationSpec {
            recipe: RecipeRef {
                owner: "ladybug-tools".to_string(),
                name: "point-in-time-view".to_string(),
                tag: "latest".to_string(),
            },
            name: "glare study".to_string(),
            description: "peak hour".to_string(),
            model_artifact: "models/sample.json".to_string(),
            sky: "climate-based 6 21 12 -lat 0 -lon 0 -tz 0 -dni 800 -dhi 120 -n 0".to_string(),
        };
        let args = spec.arguments();
        assert_eq!(args["metric"], "luminance");
        assert_eq!(args["resolution"], 800);
        assert_eq!(args["radiance-parameters"], RADIANCE_PARAMETERS);
        assert_eq!(args["model"], "models/sample.json");
    }
}
