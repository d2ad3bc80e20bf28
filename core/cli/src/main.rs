use anyhow::Result;
use clap::Parser;
use msk_discovery_cli::args::Args;
use msk_discovery_cli::cli::Cli;

fn main() -> Result<()> {
    let args = Args::parse();
    let cli = Cli::new(args);

    // Create the tokio runtime and execute the cli
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to initialize runtime")
        .block_on(cli.exec())
}
