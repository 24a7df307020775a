mod cmd;
mod config;
mod error;

use clap::Parser;
use config::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Resolve(args) => cmd::resolve::run(args),
        Commands::Request(args) => cmd::resolve::run_request(args),
        Commands::Dtype(args) => cmd::types::dtype(args),
        Commands::Native(args) => cmd::types::native(args),
        Commands::Generic(args) => cmd::types::generic(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
