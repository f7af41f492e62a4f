//! CLI argument definitions for cepfetch.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `CEP` | `01153000` | Postal code, passed to providers as-is |
//! | `--timeout-ms` | `1000` | Deadline for the whole race |
//! | `--source` | all | Providers to race (repeatable or comma separated) |
//! | `--format` | `text` | Output format (text, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! # Race every provider for the default CEP
//! cepfetch
//!
//! # Only ViaCEP, JSON report
//! cepfetch 01001000 --source viacep --format json --pretty
//! ```

use cepfetch_core::ProviderId;
use clap::{Parser, ValueEnum};

/// Race Brazilian CEP providers and print the first answer.
#[derive(Debug, Parser)]
#[command(
    name = "cepfetch",
    author,
    version,
    about = "Race Brazilian CEP providers and print the first answer",
    long_about = "cepfetch queries every configured address provider (BrasilAPI, ViaCEP) \
concurrently and prints whichever answers first. Slower providers are cancelled.\n\
\n\
Endpoint templates can be overridden with CEPFETCH_BRASILAPI_URL and \
CEPFETCH_VIACEP_URL; log verbosity is read from CEPFETCH_LOG."
)]
pub struct Cli {
    /// Postal code to look up.
    #[arg(default_value = "01153000")]
    pub cep: String,

    /// Deadline for the whole lookup in milliseconds.
    #[arg(
        long,
        env = "CEPFETCH_TIMEOUT_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Providers to race; all registered providers when omitted.
    #[arg(long = "source", env = "CEPFETCH_SOURCES", value_delimiter = ',')]
    pub sources: Vec<ProviderId>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
