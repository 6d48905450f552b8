//! `twig build` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::VaultArgs;
use super::write::write_tables;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    vault: VaultArgs,

    /// Output directory for the JSON tables (default: .twig/out/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn verbose(&self) -> bool {
        self.vault.verbose
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.vault.load(self.output_dir, &output)?;

        let output_dir = &loaded.config.output_resolved.dir;
        output.info(&format!("Output: {}", output_dir.display()));

        if !loaded.failures.is_empty() {
            output.warning(&format!(
                "Skipped {} invalid note(s):",
                loaded.failures.len()
            ));
            output.failures(&loaded.failures);
        }

        let resolution = loaded.site.resolution();
        let written = write_tables(output_dir, resolution)?;
        tracing::info!(files = written.len(), dir = %output_dir.display(), "Tables written");

        output.success(&format!(
            "Navigation built: {} pages, {} sidebars, {} files written to {}",
            resolution.leaf_nodes.len(),
            resolution.sidebar.len(),
            written.len(),
            output_dir.display()
        ));
        Ok(())
    }
}
