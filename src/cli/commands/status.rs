//! `pwvault status` — report on the vault files without a password.

use crate::cli::output;
use crate::cli::{load_settings, Cli};
use crate::errors::Result;
use crate::vault::{ops, VaultStore};

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = VaultStore::from_settings(&settings);

    let status = ops::status(&store);
    output::print_status(
        &status,
        &store.vault_path().to_string_lossy(),
        &store.salt_path().to_string_lossy(),
    );

    if !status.vault_encrypted {
        output::tip("The vault is created by the first save.");
    }

    Ok(())
}
