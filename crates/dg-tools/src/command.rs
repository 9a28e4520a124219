//! External command specification and execution.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::{ToolError, ToolResult};

/// Everything needed to invoke one external tool once.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Overrides merged over the inherited process environment.
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }
}

/// Captured result of a completed invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

/// Seam for invoking external tools; tests substitute a stub.
pub trait ToolRunner {
    fn run(&self, command: &ToolCommand) -> ToolResult<ToolOutput>;

    /// Run and fail on any non-zero exit, carrying the captured stderr.
    fn run_checked(&self, command: &ToolCommand) -> ToolResult<ToolOutput> {
        let output = self.run(command)?;
        if !output.success() {
            return Err(ToolError::Failed {
                program: command.program_name(),
                code: output.status_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

/// Runs tools as real OS processes, capturing both output streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> ToolResult<ToolOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        for (key, value) in &command.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            program = %command.program.display(),
            args = ?command.args,
            "running external tool"
        );

        let started = Instant::now();
        let output = cmd.output().map_err(|source| ToolError::Launch {
            program: command.program_name(),
            source,
        })?;
        let duration = started.elapsed();

        let status_code = output.status.code().ok_or_else(|| ToolError::Terminated {
            program: command.program_name(),
        })?;

        Ok(ToolOutput {
            status_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_args_and_env() {
        let cmd = ToolCommand::new("evalglare")
            .arg("-c")
            .arg("check.hdr")
            .args(["-vth", "-vv", "180"])
            .env("RAYPATH", "/opt/radiance/lib");

        assert_eq!(cmd.args, vec!["-c", "check.hdr", "-vth", "-vv", "180"]);
        assert_eq!(cmd.env.get("RAYPATH").map(String::as_str), Some("/opt/radiance/lib"));
        assert_eq!(cmd.program_name(), "evalglare");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_stdout() {
        let output = SystemRunner
            .run_checked(&ToolCommand::new("echo").arg("hello"))
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.success());
    }

    #[cfg(unix)]
    #[test]
    fn missing_binary_is_a_launch_error() {
        let err = SystemRunner
            .run(&ToolCommand::new("/nonexistent/dayglare-tool"))
            .unwrap_err();
        assert!(matches!(err, ToolError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failed_error() {
        let err = SystemRunner
            .run_checked(&ToolCommand::new("false"))
            .unwrap_err();
        assert!(matches!(err, ToolError::Failed { code, .. } if code != 0));
    }
}
