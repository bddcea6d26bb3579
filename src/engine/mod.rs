//! The expansion engine.
//!
//! One `Engine` instance wraps an immutable `EngineConfig` and exposes the
//! whole pipeline: front matter parsing, argument substitution, recursive
//! include resolution, and allowlisted command execution. Each call is
//! independent; the engine holds no per-expansion state.
//!
//! Within a single expansion everything runs sequentially in document
//! order. File reads and child processes are the only suspension points,
//! and a failure at any step abandons the expansion with no partial output.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

pub mod arguments;
pub mod executor;
pub mod frontmatter;
pub mod includes;
pub mod path_guard;
pub mod sanitize;
pub mod scanner;
pub mod validator;

pub use executor::ExecutionOptions;
pub use frontmatter::ParsedTemplate;
pub use scanner::CommandTemplate;
pub use validator::ValidatedCommand;

use crate::config::EngineConfig;
use crate::error::Result;

/// `!command`: at the start of the text or after a newline, taking the
/// rest of the line.
static COMMAND_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|\n)!([^\n]*)").expect("command marker pattern is valid"));

pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        debug!(
            allowed = config.allowed_commands.len(),
            max_depth = config.max_include_depth,
            "engine initialized"
        );
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Split a raw template into metadata and body.
    pub fn parse(&self, raw: &str) -> Result<ParsedTemplate> {
        frontmatter::parse(raw)
    }

    /// Expand `$ARGUMENTS` and `$1`..`$9` placeholders.
    pub fn substitute_arguments(&self, body: &str, args: &[String]) -> String {
        arguments::substitute(body, args)
    }

    /// Expand `@file` markers against `base_path`, recursively.
    pub async fn resolve_includes(&self, body: &str, base_path: &Path) -> Result<String> {
        includes::resolve(body, base_path, self.config.max_include_depth).await
    }

    /// Judge one command line against operators, allowlist, and argument
    /// metacharacters.
    pub fn validate_command(&self, line: &str) -> Result<ValidatedCommand> {
        validator::validate(line, &self.config)
    }

    /// Run every `!command` marker in the body and splice sanitized output
    /// back in. Markers run sequentially in document order; the first
    /// failure abandons the expansion.
    pub async fn execute_commands(
        &self,
        body: &str,
        options: &ExecutionOptions,
    ) -> Result<String> {
        let mut result = String::with_capacity(body.len());
        let mut last_end = 0;

        for caps in COMMAND_MARKER.captures_iter(body) {
            let marker = caps.get(0).map_or(0..0, |m| m.range());
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let line = caps.get(2).map_or("", |m| m.as_str());

            let command = self.validate_command(line)?;
            let output = executor::execute(&command, options, &self.config).await?;
            let sanitized = sanitize::sanitize_output(&output);

            result.push_str(&body[last_end..marker.start]);
            result.push_str(prefix);
            result.push_str(sanitized.trim());
            last_end = marker.end;
        }

        result.push_str(&body[last_end..]);
        Ok(result)
    }

    /// The composed pipeline: parse, substitute arguments, resolve
    /// includes, execute commands.
    pub async fn expand(
        &self,
        raw: &str,
        args: &[String],
        base_path: &Path,
        options: &ExecutionOptions,
    ) -> Result<String> {
        let template = self.parse(raw)?;
        let body = self.substitute_arguments(&template.body, args);
        let body = self.resolve_includes(&body, base_path).await?;
        self.execute_commands(&body, options).await
    }

    /// Discover command templates under a directory.
    pub fn scan_templates(&self, dir: &Path) -> Result<Vec<CommandTemplate>> {
        scanner::scan(dir)
    }
}

/// Every `!` command line in a body, trimmed, in document order. Used by
/// callers that want to audit a template without executing it.
pub fn command_lines(body: &str) -> Vec<&str> {
    COMMAND_MARKER
        .captures_iter(body)
        .map(|caps| caps.get(2).map_or("", |m| m.as_str()).trim())
        .collect()
}
