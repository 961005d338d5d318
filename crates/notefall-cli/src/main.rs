mod cli;
mod commands;
mod input;
mod pacer;

use anyhow::Result;
use clap::Parser;
use notefall_core::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("notefall=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", cli.config);
            c
        }
        Err(e) if e.is_not_found() => Config::default(),
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };

    match cli.command {
        Command::Play {
            source,
            no_log,
            format,
        } => {
            let config = Config {
                beatmap: source.apply(&config.beatmap),
                ..config
            };
            commands::play::run(&config, no_log, format)
        }
        Command::Generate { source, output } => {
            commands::generate::run(&source.apply(&config.beatmap), output.as_deref())
        }
        Command::Simulate {
            inputs,
            source,
            tick_rate,
            log,
            format,
            json,
        } => commands::simulate::run(
            &source.apply(&config.beatmap),
            config.session_config(),
            &inputs,
            tick_rate,
            log.as_deref(),
            format,
            json,
        ),
    }
}
