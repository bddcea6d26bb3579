//! Command-line validation: the single security gate in front of execution.
//!
//! Lines after a `!` marker look like shell commands but never reach a
//! shell. They are tokenized with shell quoting rules only, then judged:
//! control operators are rejected wholesale, the program must be on the
//! allowlist by exact base-name match, and arguments may not carry shell
//! metacharacters. Validation is pure and performs no I/O.

use std::path::Path;

use crate::config::EngineConfig;
use crate::error::{Result, StrudelError};

/// Control operators that must never reach the executor. Tokenization
/// strips quotes, so a quoted operator is indistinguishable from a real
/// one and is rejected the same way.
const OPERATOR_TOKENS: &[&str] = &[
    "&&", "||", "|", ";", ";;", "&", "(", ")", "{", "}", "<", ">", ">>", "<<", "<<<", "2>&1",
    ">&2", "2>",
];

/// Characters that reject an argument outright.
const DANGEROUS_CHARS: &[char] = &[
    ';', '&', '|', '`', '$', '(', ')', '<', '>', '{', '}', '[', ']', '\\',
];

/// A command line that passed validation. Built fresh per line; the
/// allowlist is consulted on every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCommand {
    /// Program token as written; allowlisting judged it by base name.
    pub program: String,
    /// Arguments, quote-processed, free of shell metacharacters.
    pub args: Vec<String>,
}

impl ValidatedCommand {
    /// The argv line for logs and error messages.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Validate one command line against the engine configuration.
pub fn validate(line: &str, config: &EngineConfig) -> Result<ValidatedCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Err(StrudelError::CommandNotAllowed("empty command".to_string()));
    }

    let tokens = shell_words::split(line)
        .map_err(|e| StrudelError::CommandNotAllowed(format!("unparseable command line: {e}")))?;

    if let Some(operator) = tokens
        .iter()
        .find(|token| OPERATOR_TOKENS.contains(&token.as_str()))
    {
        return Err(StrudelError::CommandNotAllowed(format!(
            "shell operators are not allowed: '{operator}'"
        )));
    }

    let Some((program, args)) = tokens.split_first() else {
        return Err(StrudelError::CommandNotAllowed("empty command".to_string()));
    };

    // `/bin/ls` and `ls` must be judged identically.
    let base_name = Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.clone());

    if !config.is_allowed(&base_name) {
        return Err(StrudelError::CommandNotAllowed(format!(
            "'{base_name}' is not in the allowlist"
        )));
    }

    for arg in args {
        if let Some(character) = arg.chars().find(|c| DANGEROUS_CHARS.contains(c)) {
            return Err(StrudelError::DangerousArgument {
                argument: arg.clone(),
                character,
            });
        }
    }

    Ok(ValidatedCommand {
        program: program.clone(),
        args: args.to_vec(),
    })
}
