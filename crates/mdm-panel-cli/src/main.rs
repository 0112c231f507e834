//! MDM Panel CLI - terminal host for the device management panel.
//!
//! Each invocation opens a panel for one device, performs a single action
//! and exits with a code describing the outcome.

mod cli;
mod commands;
mod error;
mod notifier;
mod output;
mod session;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};
use output::get_formatter;
use session::Session;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json = cli.json;

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{}", get_formatter(json).format_error(&e.to_string()));
            }
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let session = Session::connect(&cli).await?;

    match cli.command {
        Commands::Devices => commands::run_devices(&session).await,
        Commands::Show(args) => commands::run_show(args, &session).await,
        Commands::Apps(args) => commands::run_apps(args, &session).await,
        Commands::App(args) => commands::run_app(args, &session).await,
        Commands::Locate(args) => commands::run_locate(args, &session).await,
        Commands::Alarm(args) => commands::run_alarm(args, &session).await,
        Commands::Delete(args) => commands::run_delete(args, &session).await,
    }
}
