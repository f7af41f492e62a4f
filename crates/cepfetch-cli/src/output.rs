use std::io::{self, Write};

use cepfetch_core::Decision;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::lookup::LookupReport;

pub fn render(report: &LookupReport, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Text => write_text(&mut out, report)?,
    }

    Ok(())
}

fn write_text<W: Write>(out: &mut W, report: &LookupReport) -> io::Result<()> {
    match &report.decision {
        Decision::Resolved {
            address,
            provenance,
        } => {
            writeln!(out, "source      : {provenance}")?;
            writeln!(out, "postal_code : {}", address.postal_code)?;
            writeln!(out, "street      : {}", address.street)?;
            writeln!(out, "neighborhood: {}", address.neighborhood)?;
            writeln!(out, "city        : {}", address.city)?;
            writeln!(out, "state       : {}", address.state_code)?;
            writeln!(out, "latency_ms  : {}", report.latency_ms)?;
        }
        Decision::AllFailed { failures } => {
            writeln!(out, "all providers failed for '{}':", report.identifier)?;
            for failure in failures {
                writeln!(out, "  - {}: {}", failure.provenance, failure.reason)?;
            }
        }
        Decision::TimedOut => {
            writeln!(
                out,
                "timeout: no provider answered within {} ms",
                report.timeout_ms
            )?;
        }
    }

    Ok(())
}
