use clap::Parser;
use pwvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info for us and request traces.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pwvault=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve { ref bind } => pwvault::cli::commands::serve::execute(&cli, bind.as_deref()),
        Commands::Status => pwvault::cli::commands::status::execute(&cli),
        Commands::List => pwvault::cli::commands::list::execute(&cli),
        Commands::Get { ref key } => pwvault::cli::commands::get::execute(&cli, key),
    };

    if let Err(e) = result {
        pwvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
