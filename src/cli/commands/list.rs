//! `pwvault list` — unlock the vault and display secret names in a table.

use crate::cli::output;
use crate::cli::{load_settings, prompt_password, Cli};
use crate::errors::Result;
use crate::vault::{ops, VaultStore};

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = VaultStore::from_settings(&settings);

    let password = prompt_password()?;
    let unlocked = ops::unlock(&store, &password)?;

    let updated = unlocked
        .last_updated
        .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    output::info(&format!(
        "{} secret(s), last updated {updated}",
        unlocked.count
    ));

    output::print_secrets_table(&unlocked.secrets);

    Ok(())
}
