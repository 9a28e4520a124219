//! Glare evaluation via the external `evalglare` binary.

use std::path::{Path, PathBuf};

use dg_core::{ComfortCategory, GlareScore};

use crate::command::{ToolCommand, ToolRunner};
use crate::{ToolError, ToolResult};

/// File name of the annotated check image evalglare writes.
pub const CHECK_IMAGE_NAME: &str = "check_hdr.hdr";

/// Outcome of one evalglare run.
#[derive(Debug, Clone)]
pub struct GlareEvaluation {
    /// Annotated copy of the input with detected glare sources marked.
    pub check_image: PathBuf,
    pub score: GlareScore,
    pub category: ComfortCategory,
}

impl GlareEvaluation {
    pub fn dgp(&self) -> f64 {
        self.score.dgp
    }
}

/// Evaluate an HDR image, writing the check image into `target_dir`.
///
/// Merged HDR input usually carries no view information, so the default
/// hemispherical fish-eye view (180x180) is supplied on the command line.
pub fn eval_hdr(
    runner: &dyn ToolRunner,
    binary: &Path,
    hdr_path: &Path,
    target_dir: &Path,
) -> ToolResult<GlareEvaluation> {
    let check_image = target_dir.join(CHECK_IMAGE_NAME);

    let command = ToolCommand::new(binary)
        .arg("-c")
        .arg(check_image.to_string_lossy())
        .args(["-vth", "-vv", "180", "-vh", "180"])
        .arg(hdr_path.to_string_lossy());

    let output = runner.run_checked(&command)?;
    let score = parse_glare_output(&output.stdout, &command.program_name())?;
    let category = score.category();

    tracing::info!(dgp = score.dgp, %category, "evaluated HDR image");

    Ok(GlareEvaluation {
        check_image,
        score,
        category,
    })
}

/// Parse the result line: the last colon-delimited segment is a
/// space-separated list of floats, the first of which is the DGP.
fn parse_glare_output(stdout: &str, program: &str) -> ToolResult<GlareScore> {
    let segment = stdout
        .rsplit(':')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::EmptyOutput {
            program: program.to_string(),
        })?;

    let indices = segment
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ToolError::Parse {
                program: program.to_string(),
                what: format!("'{token}' is not a number"),
            })
        })
        .collect::<ToolResult<Vec<f64>>>()?;

    GlareScore::from_indices(indices).map_err(|e| ToolError::Parse {
        program: program.to_string(),
        what: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ToolOutput;
    use std::time::Duration;

    /// Runner that replays canned output without touching the OS.
    struct StubRunner {
        stdout: String,
        status_code: i32,
    }

    impl ToolRunner for StubRunner {
        fn run(&self, _command: &ToolCommand) -> ToolResult<ToolOutput> {
            Ok(ToolOutput {
                status_code: self.status_code,
                stdout: self.stdout.clone(),
                stderr: String::new(),
                duration: Duration::from_millis(5),
            })
        }
    }

    #[test]
    fn parses_dgp_from_result_line() {
        let runner = StubRunner {
            stdout: "dgp,dgi,ugr,vcp,cgi,Lveil: 0.36 1.2 3.4".to_string(),
            status_code: 0,
        };
        let eval = eval_hdr(
            &runner,
            Path::new("evalglare"),
            Path::new("sample.hdr"),
            Path::new("/tmp/out"),
        )
        .unwrap();

        assert_eq!(eval.dgp(), 0.36);
        assert_eq!(eval.category.label(), "Perceptible Glare");
        assert_eq!(eval.check_image, Path::new("/tmp/out").join(CHECK_IMAGE_NAME));
        assert_eq!(eval.score.extra_indices, vec![1.2, 3.4]);
    }

    #[test]
    fn failed_run_surfaces_before_parsing() {
        let runner = StubRunner {
            stdout: String::new(),
            status_code: 1,
        };
        let err = eval_hdr(
            &runner,
            Path::new("evalglare"),
            Path::new("sample.hdr"),
            Path::new("/tmp/out"),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Failed { code: 1, .. }));
    }

    #[test]
    fn empty_stdout_is_an_explicit_error() {
        let runner = StubRunner {
            stdout: "   ".to_string(),
            status_code: 0,
        };
        let err = eval_hdr(
            &runner,
            Path::new("evalglare"),
            Path::new("sample.hdr"),
            Path::new("/tmp/out"),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::EmptyOutput { .. }));
    }

    #[test]
    fn garbage_output_is_a_parse_error() {
        let runner = StubRunner {
            stdout: "result: not numbers".to_string(),
            status_code: 0,
        };
        let err = eval_hdr(
            &runner,
            Path::new("evalglare"),
            Path::new("sample.hdr"),
            Path::new("/tmp/out"),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Parse { .. }));
    }
}
