use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::engine::{command_lines, Engine};
use crate::Result;

/// Handler for the `check` command
pub struct CheckCommand {
    pub template: PathBuf,
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    pub fn new(template: PathBuf, config: Option<PathBuf>) -> Self {
        Self { template, config }
    }

    /// Print a verdict per `!command` line without executing anything.
    /// Exits nonzero when any line is rejected.
    pub async fn execute(&self) -> Result<()> {
        let config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        let engine = Engine::new(config);

        let raw = tokio::fs::read_to_string(&self.template).await?;
        let template = engine.parse(&raw)?;

        let lines = command_lines(&template.body);
        if lines.is_empty() {
            println!("no command lines found");
            return Ok(());
        }

        let mut rejected = 0usize;
        for line in lines {
            match engine.validate_command(line) {
                Ok(command) => println!("allow  {}", command.display_line()),
                Err(e) => {
                    rejected += 1;
                    println!("deny   {line}  ({e})");
                }
            }
        }

        if rejected > 0 {
            eprintln!("{rejected} command line(s) rejected");
            std::process::exit(1);
        }
        Ok(())
    }
}
