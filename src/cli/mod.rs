//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{VaultError, Result};

/// Environment variable checked before prompting for a password.
pub const PASSWORD_ENV: &str = "PWVAULT_PASSWORD";

/// pwvault CLI: password-protected secret store.
#[derive(Parser)]
#[command(
    name = "pwvault",
    about = "Password-protected encrypted secret store with an HTTP API",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./.pwvault.toml if present)
    #[arg(short, long, env = "PWVAULT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the vault and salt files
    #[arg(long, env = "PWVAULT_DIR", global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Serve the vault HTTP API
    Serve {
        /// Address to listen on (e.g. 127.0.0.1:8181)
        #[arg(short, long, env = "PWVAULT_BIND")]
        bind: Option<String>,
    },

    /// Show whether the vault and salt exist (no password needed)
    Status,

    /// Unlock the vault and list secret names
    List,

    /// Print a single secret's value
    Get {
        /// Secret name
        key: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve settings: config file first, then CLI/env overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_file(path)?,
        None => Settings::load(&std::env::current_dir()?)?,
    };

    if let Some(dir) = &cli.vault_dir {
        settings.vault_dir.clone_from(dir);
    }

    Ok(settings)
}

/// Get the vault password, trying in order:
/// 1. `PWVAULT_PASSWORD` env var (scripts, CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn vault_dir_flag_overrides_settings() {
        let cli = Cli::parse_from([
            "pwvault",
            "--config",
            "/nonexistent/.pwvault.toml",
            "status",
        ]);
        // An explicit but missing config file is an error, not defaults.
        assert!(load_settings(&cli).is_err());

        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = tmp.path().join("conf.toml");
        std::fs::write(&cfg, "vault_dir = \"from-file\"\n").unwrap();

        let cfg_arg = cfg.to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "pwvault",
            "--config",
            cfg_arg.as_str(),
            "--vault-dir",
            "override",
            "status",
        ]);
        assert_eq!(load_settings(&cli).unwrap().vault_dir, "override");
    }

    #[test]
    fn serve_accepts_bind_flag() {
        let cli = Cli::parse_from(["pwvault", "serve", "--bind", "0.0.0.0:9999"]);
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.as_deref(), Some("0.0.0.0:9999")),
            _ => panic!("expected serve"),
        }
    }
}
