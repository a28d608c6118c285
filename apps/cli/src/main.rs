#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod commands;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use pinvault::kernel::config::{AppConfig, LoggingConfig};
use pinvault_logger::{LevelFilter, Logger, parse_level};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg =
        AppConfig::load(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    if let Some(dir) = &cli.data_dir {
        cfg.storage.data_dir.clone_from(dir);
    }
    if let Some(account) = &cli.account {
        cfg.storage.account.clone_from(account);
    }

    let _log = init_logger(&cfg.logging, cli.verbose)?;

    commands::run(cli, &cfg).await
}

fn init_logger(logging: &LoggingConfig, verbose: u8) -> anyhow::Result<Logger> {
    let level = match verbose {
        0 => parse_level(&logging.level)?,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level(level).console(logging.console);
    let logger = match &logging.dir {
        Some(dir) => builder.path(dir).max_files(logging.max_files).json(logging.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
