use std::path::PathBuf;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::engine::{Engine, ExecutionOptions};
use crate::Result;

/// Handler for the `expand` command
pub struct ExpandCommand {
    pub template: PathBuf,
    pub args: Vec<String>,
    pub base_dir: Option<PathBuf>,
    pub cwd: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
    pub config: Option<PathBuf>,
}

impl ExpandCommand {
    pub fn new(
        template: PathBuf,
        args: Vec<String>,
        base_dir: Option<PathBuf>,
        cwd: Option<PathBuf>,
        timeout_ms: Option<u64>,
        config: Option<PathBuf>,
    ) -> Self {
        Self {
            template,
            args,
            base_dir,
            cwd,
            timeout_ms,
            config,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        let engine = Engine::new(config);

        let raw = tokio::fs::read_to_string(&self.template).await?;

        let base_dir = self
            .base_dir
            .clone()
            .or_else(|| self.template.parent().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let cwd = self.cwd.clone().unwrap_or_else(|| base_dir.clone());

        let mut options = ExecutionOptions::new(cwd);
        if let Some(ms) = self.timeout_ms {
            options.timeout = Some(Duration::from_millis(ms));
        }

        let expanded = engine
            .expand(&raw, &self.args, &base_dir, &options)
            .await?;

        // Expansion output is the program's output; logs stay on stderr.
        print!("{expanded}");
        Ok(())
    }
}
