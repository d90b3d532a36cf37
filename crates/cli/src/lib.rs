use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tickergate")]
#[command(about = "Tickergate - a market-data aggregation gateway")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gateway with the given configuration
    Start {
        /// Path to the configuration file
        #[arg(short, long, default_value = "gateway.yaml")]
        config: PathBuf,

        /// Override the HTTP bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the HTTP port
        #[arg(short, long)]
        port: Option<u16>,

        /// Log output format (pretty, json, compact)
        #[arg(long, default_value = "pretty")]
        log_format: String,
    },

    /// Validate a configuration without starting the gateway
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "gateway.yaml")]
        config: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "gateway.yaml")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
