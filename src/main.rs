use anyhow::Result;
use clap::{CommandFactory, Parser};

use sweeper_actions::cli::{Cli, Command};
use sweeper_actions::commands;
use sweeper_actions::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;
    let config_path = cli.config.clone().or_else(Config::default_path);

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::List(args) => {
            tracing::info!(?args, "Listing cleanups");
            commands::list::run(args, &config)?;
        }
        Command::Run(args) => {
            tracing::info!(?args, "Running cleanup");
            commands::run::run(args, config, config_path.as_deref())?;
        }
        Command::Configure(args) => {
            tracing::info!(?args, "Configuring cleanup");
            commands::configure::run(args, config, config_path.as_deref())?;
        }
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "sweeper-actions",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sweeper_actions={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
