use std::time::{Duration, Instant};

use cepfetch_core::race::elapsed_ms;
use cepfetch_core::{resolve, Decision, ProviderRegistryBuilder};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

/// Everything the reporter prints about one lookup.
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub identifier: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub timeout_ms: u64,
    pub latency_ms: u64,
    pub decision: Decision,
}

impl LookupReport {
    pub fn new(
        identifier: impl Into<String>,
        timeout_ms: u64,
        latency_ms: u64,
        decision: Decision,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            generated_at: OffsetDateTime::now_utc(),
            timeout_ms,
            latency_ms,
            decision,
        }
    }

    pub const fn exit_code(&self) -> u8 {
        match self.decision {
            Decision::Resolved { .. } => 0,
            Decision::AllFailed { .. } => 3,
            Decision::TimedOut => 4,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<LookupReport, CliError> {
    let identifier = cli.cep.trim();
    if identifier.is_empty() {
        return Err(CliError::InvalidArgument(String::from(
            "postal code cannot be empty",
        )));
    }

    let registry = ProviderRegistryBuilder::new().with_env_overrides().build()?;
    let providers = registry.select(&cli.sources)?;
    debug!(
        identifier,
        providers = ?providers.iter().map(|source| source.id()).collect::<Vec<_>>(),
        timeout_ms = cli.timeout_ms,
        "starting lookup"
    );

    let started = Instant::now();
    let decision = resolve(identifier, &providers, Duration::from_millis(cli.timeout_ms)).await;

    Ok(LookupReport::new(
        identifier,
        cli.timeout_ms,
        elapsed_ms(started),
        decision,
    ))
}
