// src/main.rs
mod assets;
mod check;
mod cli;
mod config;
mod error;
mod page;
mod script;
mod serve;
mod template;

use clap::Parser;
use cli::{Cli, Commands};
use error::PageError;
use log::LevelFilter;

fn main() -> Result<(), PageError> {
  // Values from .env feed clap's `env` fallbacks, so this must run before parsing.
  // Only the working directory is consulted, never its parents.
  let dotenv = dotenvy::from_path(".env");

  let cli = Cli::parse();

  // Setup logging based on verbosity
  let log_level = match cli.verbose {
    0 => LevelFilter::Info,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  env_logger::Builder::new().filter_level(log_level).init();

  match dotenv {
    Ok(()) => log::debug!("Loaded environment from .env"),
    Err(e) if e.not_found() => log::debug!("No .env file found"),
    Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
  }
  log::debug!("CLI args: {:?}", cli);

  match cli.command {
    Commands::Render(args) => {
      page::run_render(args.output.as_deref())?;
    }
    Commands::Serve(args) => {
      serve::run_serve(args)?;
    }
    Commands::Check(args) => {
      check::run_check(args)?;
    }
    Commands::Assets => {
      assets::run_assets()?;
    }
  }

  Ok(())
}
