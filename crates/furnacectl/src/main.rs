use anyhow::Result;
use clap::Parser;
use furnacectl_core::Config;
use tracing::{debug, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aws;
mod cli;
mod commands;
mod error;

use cli::{Cli, Commands};
use error::FurnaceCtlError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.display_with_suggestions());
            std::process::exit(1);
        }
    };

    if let Err(e) = execute_command(&cli, &config).await {
        eprintln!("{}", e.display_with_suggestions());
        std::process::exit(1);
    }

    Ok(())
}

/// Configuration is built once here and passed down by reference; nothing
/// below main reads the environment or any ambient global.
fn load_config(cli: &Cli) -> Result<Config, FurnaceCtlError> {
    let mut config = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("loading config from explicit path: {:?}", path);
        let mut config = Config::load_from_path(&path)?;
        config.apply_env_overrides();
        config
    } else {
        debug!("loading config from default location");
        Config::load()?
    };
    if let Some(region) = &cli.region {
        config.region = region.clone();
    }
    Ok(config)
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag when set
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "furnacectl=warn,furnacectl_core=warn",
            1 => "furnacectl=info,furnacectl_core=info",
            2 => "furnacectl=debug,furnacectl_core=debug",
            _ => "furnacectl=trace,furnacectl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();
}

async fn execute_command(cli: &Cli, config: &Config) -> Result<(), FurnaceCtlError> {
    trace!("executing command: {:?}", cli.command);

    let clients = aws::connect(&config.region).await;

    match &cli.command {
        Commands::Create {
            stack,
            template,
            wait,
        } => {
            commands::create::handle_create(
                config,
                &clients,
                stack.clone(),
                template.clone(),
                wait,
            )
            .await
        }
        Commands::Push { stack, app, wait } => {
            commands::push::handle_push(config, &clients, stack.clone(), app.clone(), wait).await
        }
        Commands::Delete { stack, wait } => {
            commands::delete::handle_delete(config, &clients, stack.clone(), wait).await
        }
        Commands::Status { stack } => {
            commands::status::handle_status(config, &clients, stack.clone()).await
        }
    }
}
