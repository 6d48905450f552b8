//! `twig check` command implementation.

use clap::Args;

use super::VaultArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    vault: VaultArgs,
}

impl CheckArgs {
    pub(crate) fn verbose(&self) -> bool {
        self.vault.verbose
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.vault.load(None, &output)?;
        let repository = loaded.site.repository();

        output.info(&format!(
            "{} notes, {} virtual nodes, {} pages",
            repository.len() - repository.virtual_count(),
            repository.virtual_count(),
            loaded.site.resolution().leaf_nodes.len()
        ));

        if loaded.failures.is_empty() {
            output.success("All notes are valid");
            return Ok(());
        }

        output.failures(&loaded.failures);
        Err(CliError::Validation(format!(
            "{} note(s) failed to import",
            loaded.failures.len()
        )))
    }
}
