mod args;
mod logging;
mod output;

use anyhow::{Context, Result, bail};
use mailgun_validator::{Client, ParseOptions};
use std::io::{self, BufRead};

use crate::args::{Cli, Commands};
use crate::output::{Report, ValidationRow};

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.context("read stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

fn build_client(cli: &Cli) -> Result<Client> {
    let Some(api_key) = cli.api_key.as_deref() else {
        bail!("missing API key: pass --api-key or set MAILGUN_PUBLIC_KEY");
    };
    let mut builder = Client::builder(api_key)
        .base_url(cli.base_url.as_str())
        .user_agent(concat!("mailgun-validator-cli/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = cli.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("build HTTP client")
}

/// Inputs come from `stdin` when `--stdin` is set, from the positionals otherwise.
async fn execute<R: BufRead>(cli: &Cli, cmd: &Commands, client: &Client, stdin: R) -> Result<Report> {
    let (positionals, full) = match cmd {
        Commands::Validate { emails } => (emails, false),
        Commands::Parse { addresses, full } => (addresses, *full),
    };
    let inputs = if cli.stdin {
        read_lines(stdin)?
    } else {
        positionals.clone()
    };
    if inputs.is_empty() {
        bail!("no address given");
    }

    let report = match cmd {
        Commands::Validate { .. } => {
            let mut rows = Vec::with_capacity(inputs.len());
            for input in inputs {
                let result = client
                    .validate(&input)
                    .await
                    .with_context(|| format!("validate '{input}'"))?;
                rows.push(ValidationRow { input, result });
            }
            Report::Validation(rows)
        }
        Commands::Parse { .. } => {
            let options = ParseOptions::new().syntax_only(!full);
            let result = client
                .parse_with_options(inputs, &options)
                .await
                .context("parse addresses")?;
            Report::Parse(result)
        }
    };
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let Some(cmd) = cli.cmd.as_ref() else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    };

    let client = build_client(&cli)?;
    let report = execute(&cli, cmd, &client, io::stdin().lock()).await?;

    output::emit(&report, &cli.format, cli.out.as_deref())?;

    // exit codes: 0 OK, 2 invalid/unparseable, 1 fatal
    if !report.is_clean() {
        std::process::exit(2);
    }
    Ok(())
}
