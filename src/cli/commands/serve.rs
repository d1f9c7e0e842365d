//! `pwvault serve` — run the HTTP API.

use crate::cli::output;
use crate::cli::{load_settings, Cli};
use crate::errors::{VaultError, Result};

/// Execute the `serve` command.
pub fn execute(cli: &Cli, bind: Option<&str>) -> Result<()> {
    let mut settings = load_settings(cli)?;
    if let Some(addr) = bind {
        settings.bind_addr = addr.to_string();
    }
    settings.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| VaultError::ServerError(format!("failed to start runtime: {e}")))?;

    runtime.block_on(crate::server::serve(&settings))?;

    output::success("Server shut down cleanly");
    Ok(())
}
