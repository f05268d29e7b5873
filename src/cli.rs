// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "escudeiro",
    author,
    version,
    about = "Renders, serves and checks the Squire's Page document.",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Increase verbosity level (e.g., -v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render the page to stdout or a file
  Render(RenderArgs),
  /// Serve the page over HTTP
  Serve(ServeArgs),
  /// Check a rendered document against the page contract
  Check(CheckArgs),
  /// List the external assets the page references
  Assets,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
  /// File to write the page to (stdout when omitted)
  #[arg(short, long)]
  pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
  /// Address to listen on
  #[arg(long, env = "ESCUDEIRO_HOST", default_value = "0.0.0.0")]
  pub host: String,

  /// Port to listen on
  #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
  pub port: u16,

  /// Seconds in-flight requests get to finish after Ctrl-C
  #[arg(long, default_value_t = 30)]
  pub shutdown_timeout_secs: u64,

  /// Seconds allowed to read a request body
  #[arg(long, default_value_t = 5)]
  pub read_timeout_secs: u64,

  /// Seconds allowed to produce a response before answering 408
  #[arg(long, default_value_t = 10)]
  pub write_timeout_secs: u64,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
  /// Rendered document to check (the freshly rendered page when omitted)
  pub path: Option<PathBuf>,

  /// Print the report as JSON
  #[arg(long)]
  pub json: bool,
}
