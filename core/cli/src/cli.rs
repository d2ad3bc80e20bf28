use anyhow::Result;
use msk_discovery::SdClient;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command};
use crate::commands::{file, http};

pub struct Cli {
    args: Args,
}

impl Cli {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    pub async fn exec(self) -> Result<()> {
        self.setup_logging();

        let Args {
            job_prefix,
            regions,
            cmd,
            ..
        } = self.args;
        let client = SdClient::new(job_prefix, regions);

        info!(
            job_prefix = %client.job_prefix,
            regions = ?client.regions,
            "MSK service discovery starting"
        );

        match cmd {
            Command::File { output, interval } => {
                file::exec(client, output, interval.into()).await
            },
            Command::Http { port } => http::exec(client, port).await,
        }
    }

    fn setup_logging(&self) {
        // Build the filter from cli args, or environment variable
        let env_filter = EnvFilter::builder()
            .with_default_directive(
                match self.args.verbose {
                    0 => LevelFilter::INFO,
                    1 => LevelFilter::DEBUG,
                    _2_or_more => LevelFilter::TRACE,
                }
                .into(),
            )
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(env_filter)
            .init();
    }
}
