//! Invocation context shared by every subcommand.

use std::sync::Arc;

use sw_domain::config::Config;
use sw_store::ManagementStore;

use crate::cli::Cli;

/// The effective configuration for one invocation: the config file as
/// the base layer, with `--url` and `--site` folded in on top. Commands
/// receive this fully resolved; nothing downstream re-reads files or
/// discovers sites on its own.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: Config,
    pub config_path: String,
    pub json: bool,
}

impl CliContext {
    /// Load the config file named by `--config`, then `SW_CONFIG`, then
    /// `config.toml`, and apply the command-line overrides.
    ///
    /// A missing file is not an error: defaults apply, and `doctor`
    /// reports the absence.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var("SW_CONFIG").ok())
            .unwrap_or_else(|| "config.toml".into());

        let mut config = if std::path::Path::new(&config_path).exists() {
            let raw = std::fs::read_to_string(&config_path)
                .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
            let parsed = toml::from_str::<Config>(&raw)
                .map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?;
            tracing::debug!(path = %config_path, "config loaded");
            parsed
        } else {
            tracing::debug!(path = %config_path, "no config file, using defaults");
            Config::default()
        };

        if let Some(url) = &cli.url {
            config.provider.base_url = url.clone();
        }
        if let Some(site) = &cli.site {
            config.provider.site = site.clone();
        }

        Ok(Self {
            config,
            config_path,
            json: cli.json,
        })
    }

    /// Open a connection to the configured provider.
    pub fn store(&self) -> anyhow::Result<Arc<dyn ManagementStore>> {
        Ok(sw_store::create_store(&self.config.provider)?)
    }
}
