use clap::Parser;
use std::path::PathBuf;
use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{Config, OutputFormat};
use crate::core::{write_report, Engine};

#[derive(Parser, Debug)]
#[command(name = "archmetrics")]
#[command(about = "Count structure, sort types into architectural roles and list HTTP endpoints of a Java source tree")]
#[command(version)]
pub struct Cli {
    /// Root directory to scan
    pub root: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (overrides the configuration file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also classify nested member types
    #[arg(long)]
    pub include_nested: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults), then flags
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.include_nested {
            config.parsing.include_nested_types = true;
        }

        Ok(config)
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        debug!("Effective configuration: {:?}", config);

        let mut engine = Engine::new(config)?;
        let report = engine.scan(&self.root).await?;

        let stdout = std::io::stdout();
        write_report(stdout.lock(), &report, engine.config().output.format)?;
        Ok(())
    }
}
