use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strudel: markdown command templates with sandboxed execution
#[derive(Parser)]
#[command(name = "strudel")]
#[command(version = "0.1.0")]
#[command(about = "Expand markdown command templates with sandboxed execution")]
#[command(
    long_about = "Strudel expands @file includes and $ARGUMENTS placeholders in markdown command templates and runs embedded !command lines under a strict allowlist, without ever invoking a shell."
)]
pub struct Cli {
    /// Log level for stderr diagnostics (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full expansion pipeline over a template file
    Expand {
        /// Path to the template file
        template: PathBuf,

        /// Arguments bound to $ARGUMENTS and $1..$9
        args: Vec<String>,

        /// Base directory for @file includes (defaults to the template's directory)
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Working directory for !command execution (defaults to the base directory)
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Per-command timeout override in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Engine configuration file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate every !command line in a template without executing
    Check {
        /// Path to the template file
        template: PathBuf,

        /// Engine configuration file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List command templates under a directory
    List {
        /// Directory to scan for *.md templates
        dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_expand_parsing() {
        let cli = Cli::parse_from(["strudel", "expand", "review.md", "world", "--timeout-ms", "500"]);

        match cli.command {
            Commands::Expand {
                template,
                args,
                timeout_ms,
                base_dir,
                ..
            } => {
                assert_eq!(template, PathBuf::from("review.md"));
                assert_eq!(args, vec!["world".to_string()]);
                assert_eq!(timeout_ms, Some(500));
                assert_eq!(base_dir, None);
            }
            _ => panic!("Wrong command parsed"),
        }
    }

    #[test]
    fn test_check_parsing() {
        let cli = Cli::parse_from(["strudel", "check", "review.md"]);

        match cli.command {
            Commands::Check { template, config } => {
                assert_eq!(template, PathBuf::from("review.md"));
                assert_eq!(config, None);
            }
            _ => panic!("Wrong command parsed"),
        }
    }

    #[test]
    fn test_list_parsing() {
        let cli = Cli::parse_from(["strudel", "list", "commands"]);

        match cli.command {
            Commands::List { dir } => assert_eq!(dir, PathBuf::from("commands")),
            _ => panic!("Wrong command parsed"),
        }
    }

    #[test]
    fn test_global_log_level() {
        let cli = Cli::parse_from(["strudel", "--log-level", "debug", "list", "commands"]);
        assert_eq!(cli.log_level, "debug");
    }
}
