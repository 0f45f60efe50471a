mod args;
mod cmd;
mod output;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

fn main() -> Result<()> {
  let cli = Cli::parse_normalized();

  // Logs go to stderr so stdout carries only the banner and tool output
  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  cmd::cmd_run(cli.pipeline_options())
}
