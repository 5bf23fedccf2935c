use std::time::Duration;

use clap::{Parser, Subcommand};
use mailgun_validator::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(name = "mailgun-validator-cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// public API key (sent as the Basic auth password)
    #[arg(long, env = "MAILGUN_PUBLIC_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// base URL of the validation API
    #[arg(long, env = "MAILGUN_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// per-request timeout in milliseconds (0 disables it)
    #[arg(long = "timeout", default_value_t = 10_000, global = true)]
    pub timeout_ms: u64,

    /// read addresses from stdin (one per line) instead of the arguments
    #[arg(long, global = true)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON/CSV per --format)
    #[arg(long, global = true)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human", global = true)]
    pub format: String,

    /// more logs on stderr (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// validate each address with one request per address
    Validate {
        emails: Vec<String>,
    },
    /// split a batch of addresses into parsed and unparseable
    Parse {
        addresses: Vec<String>,
        /// ask for a full check instead of syntax only (syntaxOnly=false)
        #[arg(long)]
        full: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}
