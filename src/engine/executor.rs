//! Shell-free process execution with timeout and output capping.
//!
//! Validated commands are spawned directly as argv arrays via
//! `tokio::process::Command`; no shell ever sits between validation and
//! execution, so the arguments the validator approved are exactly the
//! arguments the process receives.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::validator::ValidatedCommand;
use crate::config::EngineConfig;
use crate::error::{Result, StrudelError};

/// Well-known install locations appended to the inherited search path so
/// user-local and version-manager installs stay reachable. The inherited
/// value is never replaced.
const EXTRA_PATH_DIRS: &[&str] = &["/usr/local/bin", "/opt/homebrew/bin"];
const EXTRA_HOME_PATH_DIRS: &[&str] = &[".local/bin", ".nvm/current/bin", ".volta/bin", ".bun/bin"];

/// Per-expansion execution settings.
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Working directory for spawned commands.
    pub cwd: PathBuf,
    /// Wall-clock limit override; `None` uses the engine default.
    pub timeout: Option<Duration>,
}

impl ExecutionOptions {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            timeout: None,
        }
    }
}

/// Run a validated command and capture its output.
///
/// Returns stdout, falling back to stderr when stdout is empty. Nonzero
/// exit and spawn failure surface as `Execution`; expiry of the wall-clock
/// limit kills the child and surfaces as `Timeout`.
pub async fn execute(
    command: &ValidatedCommand,
    options: &ExecutionOptions,
    config: &EngineConfig,
) -> Result<String> {
    let timeout = options.timeout.unwrap_or_else(|| config.command_timeout());
    let line = command.display_line();

    debug!(command = %line, cwd = %options.cwd.display(), "spawning template command");

    let child = Command::new(&command.program)
        .args(&command.args)
        .current_dir(&options.cwd)
        .env("PATH", augmented_path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| StrudelError::Execution {
            command: line.clone(),
            message: format!("failed to spawn: {e}"),
        })?;

    // The child rides inside the wait future; dropping it on expiry kills
    // the process (kill_on_drop).
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(waited) => waited.map_err(|e| StrudelError::Execution {
            command: line.clone(),
            message: format!("failed to collect output: {e}"),
        })?,
        Err(_) => {
            warn!(command = %line, timeout_ms = timeout.as_millis() as u64, "command timed out");
            return Err(StrudelError::Timeout {
                command: line,
                timeout_ms: timeout.as_millis() as u64,
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StrudelError::Execution {
            command: line,
            message: format!(
                "exit status {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            ),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let captured = if stdout.is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        stdout.into_owned()
    };

    Ok(truncate_output(captured, config.max_output_bytes))
}

fn truncate_output(mut output: String, max_bytes: usize) -> String {
    if output.len() <= max_bytes {
        return output;
    }

    let mut cut = max_bytes;
    while cut > 0 && !output.is_char_boundary(cut) {
        cut -= 1;
    }
    warn!(
        captured = output.len(),
        cap = max_bytes,
        "truncating command output"
    );
    output.truncate(cut);
    output
}

fn augmented_path() -> OsString {
    let inherited = std::env::var_os("PATH").unwrap_or_default();
    let mut paths: Vec<PathBuf> = std::env::split_paths(&inherited).collect();

    if let Some(home) = dirs::home_dir() {
        paths.extend(EXTRA_HOME_PATH_DIRS.iter().map(|dir| home.join(dir)));
    }
    paths.extend(EXTRA_PATH_DIRS.iter().map(PathBuf::from));

    std::env::join_paths(paths).unwrap_or(inherited)
}
