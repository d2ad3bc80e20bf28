use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(about, name = "msk-discovery", version)]
pub struct Args {
    /// String with which to prefix each job label.
    #[arg(short = 'n', long, global = true, default_value = "msk")]
    pub job_prefix: String,
    /// The AWS regions in which to scan for MSK clusters, comma split eg.
    /// 'ap-southeast-1,ap-southeast-2'.
    #[arg(short, long, required = true, value_delimiter = ',')]
    pub regions: Vec<String>,
    /// Increases the level of verbosity (the max level is -vv).
    #[arg(short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Periodically write the discovered targets to a file_sd file.
    File {
        /// Path of the file to write MSK discovery information to.
        #[arg(short, long, default_value = "msk_file_sd.yml")]
        output: PathBuf,
        /// Interval at which to scrape the AWS API for MSK cluster
        /// information.
        #[arg(short = 'i', long = "scrape-interval", default_value = "5m")]
        interval: humantime::Duration,
    },
    /// Serve the discovered targets as an http_sd endpoint.
    Http {
        /// HTTP server listen port.
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}
