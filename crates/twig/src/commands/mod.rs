//! CLI command implementations.

mod build;
mod check;
mod write;

use std::path::PathBuf;

use clap::Args;
use twig_config::{CliSettings, Config};
use twig_site::{CollectingSink, ResolveError, Site};
use twig_storage::{ImportFailure, Storage};
use twig_storage_fs::FsStorage;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Options shared by every command that reads a vault.
#[derive(Args)]
pub(crate) struct VaultArgs {
    /// Path to configuration file (default: auto-discover twig.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vault directory (overrides config).
    #[arg(short, long, env = "TWIG_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Prefix for redirect targets (overrides config).
    #[arg(short, long, env = "TWIG_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// Vault resolved for a command.
pub(crate) struct LoadedVault {
    pub config: Config,
    pub site: Site,
    pub failures: Vec<ImportFailure>,
}

impl VaultArgs {
    /// Load config, import the vault and resolve navigation.
    ///
    /// Import failures are collected, not fatal.
    fn load(&self, output_dir: Option<PathBuf>, output: &Output) -> Result<LoadedVault, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            base_url: self.base_url.clone(),
            output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));

        let storage = FsStorage::new(config.docs_resolved.source_dir.clone());
        let (site, failures) = resolve_vault(&storage, &config.site.base_url);
        let site = match site {
            Ok(site) => site,
            Err(err) => {
                if !failures.is_empty() {
                    output.warning(&format!("{} note(s) failed to import:", failures.len()));
                    output.failures(&failures);
                }
                return Err(err.into());
            }
        };

        Ok(LoadedVault {
            config,
            site,
            failures,
        })
    }
}

/// Import and resolve, keeping import failures even when resolution fails.
fn resolve_vault(
    storage: &dyn Storage,
    base_url: &str,
) -> (Result<Site, ResolveError>, Vec<ImportFailure>) {
    let sink = CollectingSink::new();
    let site = Site::load(storage, base_url, &sink);
    (site, sink.failures())
}
