//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;
use serde_json::Value;

use crate::vault::{Secrets, VaultStatus};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of secret names and the JSON type of each value.
/// Values themselves are never printed here.
pub fn print_secrets_table(secrets: &Secrets) {
    if secrets.is_empty() {
        info("No secrets in this vault yet.");
        tip("POST them to /save or /update on the running server.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type"]);

    for (name, value) in secrets {
        table.add_row(vec![name.clone(), value_kind(value).to_string()]);
    }

    println!("{table}");
}

/// Print the status report as a two-column table.
pub fn print_status(status: &VaultStatus, vault_path: &str, salt_path: &str) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["vault_path".to_string(), vault_path.to_string()]);
    table.add_row(vec!["salt_path".to_string(), salt_path.to_string()]);
    table.add_row(vec!["vault_exists".to_string(), status.vault_exists.to_string()]);
    table.add_row(vec!["salt_exists".to_string(), status.salt_exists.to_string()]);
    table.add_row(vec![
        "vault_size_bytes".to_string(),
        status.vault_size_bytes.to_string(),
    ]);
    table.add_row(vec![
        "vault_encrypted".to_string(),
        status.vault_encrypted.to_string(),
    ]);

    println!("{table}");
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
