//! External tool detection.

use crate::command::FFMPEG;
use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Availability of an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of the tool's version banner.
    pub version: Option<String>,
    /// Resolved executable path.
    pub path: Option<PathBuf>,
}

/// Locate ffmpeg on `PATH` and read its version banner.
///
/// # Example
///
/// ```no_run
/// let info = mediaforge_av::check_ffmpeg();
/// if info.available {
///     println!("{}", info.version.unwrap_or_default());
/// }
/// ```
pub fn check_ffmpeg() -> ToolInfo {
    locate(FFMPEG, "-version")
}

/// Check every tool conversions depend on.
pub fn check_tools() -> Vec<ToolInfo> {
    vec![check_ffmpeg()]
}

/// Require that a tool is on `PATH`, returning its path.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] if the tool cannot be resolved.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Resolve `name` and run it with `version_arg`. A tool counts as available
/// only when it resolves and the version call exits successfully.
fn locate(name: &str, version_arg: &str) -> ToolInfo {
    let mut info = ToolInfo {
        name: name.to_string(),
        available: false,
        version: None,
        path: None,
    };

    let Ok(path) = which::which(name) else {
        return info;
    };

    let output = Command::new(&path)
        .arg(version_arg)
        .stdin(Stdio::null())
        .output();

    if let Ok(output) = output {
        if output.status.success() {
            info.available = true;
            info.version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(str::to_string);
            info.path = Some(path);
        }
    }

    info
}
