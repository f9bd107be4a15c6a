mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{flow, regions};
#[cfg(feature = "download")]
use commands::download;

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        #[cfg(feature = "download")]
        Commands::Download(args) => download::run(&cli, args),
        Commands::Regions(args) => regions::run(&cli, args),
        Commands::Flow(args) => flow::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
