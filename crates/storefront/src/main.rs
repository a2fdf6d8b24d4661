mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "storefront", &mut std::io::stdout());
            Ok(())
        }

        // Sign-in talks to the auth endpoint, not the catalog
        Command::SignIn(args) => {
            let backend = config::resolve_backend(&cli.global)?;
            commands::auth::handle(args, &backend, &cli.global).await
        }

        // Profile commands need a user but no catalog
        Command::Profile(args) => {
            let backend = config::resolve_backend(&cli.global)?;
            commands::profile::handle(args, &backend, &cli.global).await
        }

        // All other commands drive a catalog
        cmd => {
            let backend = config::resolve_backend(&cli.global)?;
            tracing::debug!(command = ?cmd, profile = %backend.profile_name, "dispatching command");
            commands::dispatch(cmd, &backend, &cli.global).await
        }
    }
}
