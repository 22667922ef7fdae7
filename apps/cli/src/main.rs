mod main_lib;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use cepfinder_lookup::{LookupConfig, RaceCoordinator};
use clap::Parser;
use main_lib::{init_tracing, prompt_cep, render_failure, render_json, render_text};

/// Look up a Brazilian postal code, racing BrasilAPI against ViaCEP.
#[derive(Debug, Parser)]
#[command(name = "cepfinder", version, about)]
struct Args {
    /// Postal code to look up; prompted on stdin when omitted
    cep: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Race deadline in milliseconds (overrides CEP_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Emit logs as JSON lines on stderr (same as CEP_LOG_FORMAT=json)
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let log_json = args.log_json
        || std::env::var("CEP_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
    init_tracing(log_json);

    let mut config = LookupConfig::from_env();
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }

    let cep = match args.cep {
        Some(cep) => cep,
        None => prompt_cep(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let coordinator = RaceCoordinator::from_config(&config)?;
    tracing::debug!(
        "Looking up {} across {} providers",
        cep,
        coordinator.providers().len()
    );

    match coordinator.resolve(&cep).await {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if args.json {
                render_json(&mut stdout, &result)?;
            } else {
                render_text(&mut stdout, &result)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match render_failure(&mut io::stderr(), &e)? {
            Some(code) => Ok(ExitCode::from(code)),
            None => Err(e.into()),
        },
    }
}
