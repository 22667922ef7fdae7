use std::io::{self, BufRead, Write};

use cepfinder_lookup::{LookupError, LookupResult};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const SEPARATOR: &str = "----------------------------------------";

/// Install the tracing subscriber on stderr so stdout stays clean for output.
///
/// `RUST_LOG` wins over the default `warn` level.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }
}

/// Prompt for a postal code and read one line.
pub fn prompt_cep<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    writeln!(output, "Enter the postal code:")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn render_text<W: Write>(output: &mut W, result: &LookupResult) -> io::Result<()> {
    let address = &result.address;
    writeln!(
        output,
        "Fastest provider: {} ({} ms)",
        result.source,
        result.elapsed.as_millis()
    )?;
    writeln!(output, "{}", SEPARATOR)?;
    writeln!(output, "CEP: {}", address.postal_code)?;
    writeln!(output, "Street: {}", address.street)?;
    writeln!(output, "Neighborhood: {}", address.neighborhood)?;
    writeln!(output, "City: {}", address.city)?;
    writeln!(output, "State: {}", address.state)?;
    writeln!(output, "{}", SEPARATOR)
}

pub fn render_json<W: Write>(output: &mut W, result: &LookupResult) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *output, result)?;
    writeln!(output)?;
    Ok(())
}

/// Print the message for an expected lookup failure and return its exit code.
///
/// Returns `None` for errors that should propagate as unexpected.
pub fn render_failure<W: Write>(output: &mut W, error: &LookupError) -> io::Result<Option<u8>> {
    match error {
        LookupError::InvalidInput(_) => {
            writeln!(output, "Invalid postal code")?;
            Ok(Some(2))
        }
        LookupError::Timeout { timeout } => {
            writeln!(output, "No provider responded within {:?}", timeout)?;
            Ok(Some(1))
        }
        LookupError::NoProvidersAvailable | LookupError::Client(_) => Ok(None),
    }
}
