//! Messages exchanged between adapters and the race coordinator.
//!
//! | Type | Produced by | Consumed by |
//! |------|-------------|-------------|
//! | [`FetchOutcome`] | one adapter invocation | the coordinator, exactly once |
//! | [`Decision`] | the coordinator | the caller of [`resolve`](crate::race::resolve) |

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{CanonicalAddress, ProviderId};

/// Classification of a single provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection, DNS or IO failure before a response was read.
    Transport,
    /// The provider answered, but not with a usable record.
    Remote,
    /// The response body does not match the provider schema.
    Decode,
    /// The request could not be built (e.g. rendered URL does not parse).
    InvalidRequest,
    /// The adapter panicked while fetching.
    Internal,
}

impl FailureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Remote => "remote",
            Self::Decode => "decode",
            Self::InvalidRequest => "invalid_request",
            Self::Internal => "internal",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one provider did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReason {
    kind: FailureKind,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl FailureReason {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    pub fn remote_status(status: u16) -> Self {
        Self {
            kind: FailureKind::Remote,
            message: format!("upstream returned status {status}"),
            status: Some(status),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Remote, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Decode, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Internal, message)
    }

    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when the failure came from a non-success response.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FailureKind::Transport => "fetch.transport",
            FailureKind::Remote => "fetch.remote",
            FailureKind::Decode => "fetch.decode",
            FailureKind::InvalidRequest => "fetch.invalid_request",
            FailureKind::Internal => "fetch.internal",
        }
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FailureReason {}

/// The single report one adapter invocation sends to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub provenance: ProviderId,
    pub result: Result<CanonicalAddress, FailureReason>,
}

impl FetchOutcome {
    pub fn resolved(provenance: ProviderId, address: CanonicalAddress) -> Self {
        Self {
            provenance,
            result: Ok(address),
        }
    }

    pub fn failed(provenance: ProviderId, reason: FailureReason) -> Self {
        Self {
            provenance,
            result: Err(reason),
        }
    }
}

/// One provider's failure, as listed in [`Decision::AllFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provenance: ProviderId,
    pub reason: FailureReason,
}

/// Terminal result of one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Decision {
    Resolved {
        address: CanonicalAddress,
        provenance: ProviderId,
    },
    /// Every provider reported a failure; listed in arrival order.
    AllFailed { failures: Vec<ProviderFailure> },
    TimedOut,
}

impl Decision {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved { .. } => "resolved",
            Self::AllFailed { .. } => "all_failed",
            Self::TimedOut => "timed_out",
        }
    }

    pub fn address(&self) -> Option<&CanonicalAddress> {
        match self {
            Self::Resolved { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn provenance(&self) -> Option<&ProviderId> {
        match self {
            Self::Resolved { provenance, .. } => Some(provenance),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_status_records_status_code() {
        let reason = FailureReason::remote_status(503);

        assert_eq!(reason.kind(), FailureKind::Remote);
        assert_eq!(reason.status(), Some(503));
        assert_eq!(reason.code(), "fetch.remote");
        assert_eq!(
            reason.to_string(),
            "upstream returned status 503 (fetch.remote)"
        );
    }

    #[test]
    fn decision_is_tagged_by_status() {
        let decision = Decision::AllFailed {
            failures: vec![ProviderFailure {
                provenance: ProviderId::via_cep(),
                reason: FailureReason::decode("expected value at line 1 column 1"),
            }],
        };

        let value = serde_json::to_value(&decision).expect("serialize decision");
        assert_eq!(value["status"], "all_failed");
        assert_eq!(value["failures"][0]["provenance"], "viacep");
        assert_eq!(value["failures"][0]["reason"]["kind"], "decode");
        assert!(value["failures"][0]["reason"].get("status").is_none());

        let timed_out = serde_json::to_value(Decision::TimedOut).expect("serialize");
        assert_eq!(timed_out, serde_json::json!({ "status": "timed_out" }));
    }
}
