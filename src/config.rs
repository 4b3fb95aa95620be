use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::site_links::DEFAULT_SITE;

/// Default number of files scanned at the same time
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Prefix of environment variables overriding settings, e.g. `LINK_MINER_TARGET_SITE`
pub const ENV_PREFIX: &str = "LINK_MINER";

/// Settings for the link miner
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Host whose post links are recognized and normalized
    pub target_site: String,

    /// IANA-format list replacing the bundled top-level domains
    pub tld_list: Option<PathBuf>,

    /// Directory for log files
    pub log_dir: String,

    /// Number of files scanned concurrently
    pub concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_site: DEFAULT_SITE.to_string(),
            tld_list: None,
            log_dir: "logs".to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Settings {
    /// Layers defaults, the optional settings file and `LINK_MINER_*`
    /// environment variables, in that order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("target_site", defaults.target_site)?
            .set_default("log_dir", defaults.log_dir)?
            .set_default("concurrency", defaults.concurrency as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.target_site.trim().is_empty() {
            anyhow::bail!("target_site cannot be empty");
        }
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        Ok(())
    }
}
