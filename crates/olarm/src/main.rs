mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use olarm_api::{Credential, Olarm, TransportConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

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
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = config::load()?;

    let api_key = cli
        .global
        .api_key
        .clone()
        .or_else(|| cfg.api_key.clone())
        .ok_or(CliError::MissingApiKey)?;

    let mut transport = TransportConfig::default();
    if let Some(secs) = cfg.timeout_secs {
        transport.timeout = std::time::Duration::from_secs(secs);
    }

    let mut factory = Olarm::new(Credential::new(api_key)).with_transport(transport);
    if let Some(base_url) = cli.global.base_url.as_deref().or(cfg.base_url.as_deref()) {
        factory = factory.with_base_url(base_url)?;
    }
    let conn = factory.connect()?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    match cli.command {
        Command::Devices => commands::devices::run(&conn).await,
        Command::Check => commands::check::run(&conn).await,
        Command::Status { device_id } => commands::status::run(&conn, &device_id).await,
        Command::Watch { device_id, interval } => {
            commands::watch::run(&conn, &device_id, interval).await
        }
        cmd => commands::action::run(&conn, cmd).await,
    }
}
