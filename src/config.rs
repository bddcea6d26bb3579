//! Engine configuration.
//!
//! All expansion limits live here as one immutable value handed to the
//! engine at construction time. Deployments may load overrides from a YAML
//! file; absent fields keep their defaults.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, StrudelError};

/// Programs that `!` command lines may invoke, judged by base name with
/// exact-match membership.
const DEFAULT_ALLOWED_COMMANDS: &[&str] = &[
    "ls", "cat", "head", "tail", "wc", "grep", "find", "echo", "pwd", "date", "whoami", "which",
    "git",
];

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Allowlisted program base names.
    #[serde(default = "default_allowed_commands")]
    pub allowed_commands: HashSet<String>,

    /// Maximum nesting level for `@file` includes.
    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: u8,

    /// Wall-clock limit for a single command execution.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Cap on captured output per command.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
}

fn default_allowed_commands() -> HashSet<String> {
    DEFAULT_ALLOWED_COMMANDS
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_max_include_depth() -> u8 {
    3
}

fn default_command_timeout_ms() -> u64 {
    30_000
}

fn default_max_output_bytes() -> usize {
    1024 * 1024
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allowed_commands: default_allowed_commands(),
            max_include_depth: default_max_include_depth(),
            command_timeout_ms: default_command_timeout_ms(),
            max_output_bytes: default_max_output_bytes(),
        }
    }
}

impl EngineConfig {
    /// Load configuration overrides from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&contents).map_err(|e| {
            StrudelError::Parse(format!(
                "invalid engine config {}: {e}",
                path.display()
            ))
        })
    }

    /// Exact-match allowlist check on a program base name.
    pub fn is_allowed(&self, program: &str) -> bool {
        self.allowed_commands.contains(program)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}
