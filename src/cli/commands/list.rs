use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::Result;

/// Handler for the `list` command
pub struct ListCommand {
    pub dir: PathBuf,
}

impl ListCommand {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn execute(&self) -> Result<()> {
        let engine = Engine::new(EngineConfig::default());
        let templates = engine.scan_templates(&self.dir)?;

        for template in &templates {
            println!("{}\t{}", template.name, template.path.display());
        }
        Ok(())
    }
}
