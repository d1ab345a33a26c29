//! Blocking execution of external tools.

use crate::{Error, Result};
use std::process::{Command, ExitStatus, Stdio};

/// Program name of the transcoding tool.
pub const FFMPEG: &str = "ffmpeg";

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// A successful completion with nothing captured. Useful for
    /// [`ToolRunner`] implementations that do not spawn a process.
    #[cfg(any(unix, windows))]
    pub fn success() -> Self {
        #[cfg(unix)]
        use std::os::unix::process::ExitStatusExt;
        #[cfg(windows)]
        use std::os::windows::process::ExitStatusExt;

        Self {
            status: ExitStatus::from_raw(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Standard output followed by standard error.
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len());
        combined.push_str(&self.stdout);
        combined.push_str(&self.stderr);
        combined
    }
}

/// Runs an external program to completion.
///
/// Implementations must report a failed completion (spawn error or non-zero
/// exit) as [`Error::ToolFailed`], carrying the captured output.
pub trait ToolRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to exit.
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput>;
}

/// [`ToolRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::tool_failed(program, e.to_string(), ""))?;

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            #[cfg(feature = "tracing")]
            tracing::warn!("{} exited with {}", program, output.status);

            return Err(Error::tool_failed(
                program,
                output.status.to_string(),
                tool_output.combined(),
            ));
        }

        Ok(tool_output)
    }
}
