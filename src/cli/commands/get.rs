//! `pwvault get` — print a single secret's value.

use serde_json::Value;

use crate::cli::{load_settings, prompt_password, Cli};
use crate::errors::Result;
use crate::vault::{ops, VaultStore};

/// Execute the `get` command.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = VaultStore::from_settings(&settings);

    let password = prompt_password()?;
    let fetched = ops::get(&store, &password, key)?;

    // Strings print raw so the output can be piped; everything else as JSON.
    match fetched.value {
        Value::String(s) => println!("{s}"),
        other => println!("{other}"),
    }

    Ok(())
}
