//! # cepfetch Core
//!
//! Concurrent postal-code (CEP) lookup across heterogeneous address providers.
//!
//! ## Overview
//!
//! A lookup races every configured provider against the same identifier and
//! keeps the first successful answer:
//!
//! - **Canonical record** ([`CanonicalAddress`]) shared by all providers
//! - **Adapter contract** ([`AddressSource`]) with one HTTP implementation
//!   parameterized per provider
//! - **Race coordinator** ([`resolve`]) with a global deadline and
//!   cooperative cancellation of the losers
//! - **Provider registry** built from defaults and environment overrides
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Adapter contract and the BrasilAPI / ViaCEP profiles |
//! | [`domain`] | Canonical address record |
//! | [`error`] | Validation and configuration errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`outcome`] | Fetch outcomes, failure reasons and decisions |
//! | [`race`] | Race coordinator |
//! | [`registry`] | Provider registry and builder |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use cepfetch_core::{Decision, ProviderRegistryBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ProviderRegistryBuilder::new().with_env_overrides().build()?;
//!
//!     match registry.resolve("01153000", Duration::from_secs(1)).await {
//!         Decision::Resolved { address, provenance } => {
//!             println!("{provenance}: {} - {}/{}", address.street, address.city, address.state_code);
//!         }
//!         Decision::AllFailed { failures } => {
//!             for failure in failures {
//!                 eprintln!("{}: {}", failure.provenance, failure.reason);
//!             }
//!         }
//!         Decision::TimedOut => eprintln!("timeout"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Reporter │
//! └────────┬────────┘
//!          │ resolve(identifier, providers, timeout)
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Race Coordinator│────▶│ CancellationToken│
//! └────────┬────────┘     └──────────────────┘
//!          │ one task per provider, shared mpsc channel
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Address Source  │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CanonicalAddress│
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Adapter failures never cross the task boundary as panics or errors. They
//! travel as [`FailureReason`] values and surface only inside
//! [`Decision::AllFailed`]:
//!
//! ```rust
//! use cepfetch_core::{FailureKind, FailureReason};
//!
//! fn describe(reason: &FailureReason) -> &'static str {
//!     match reason.kind() {
//!         FailureKind::Transport => "network problem",
//!         FailureKind::Remote => "provider refused the lookup",
//!         FailureKind::Decode => "provider sent an unexpected payload",
//!         FailureKind::InvalidRequest => "endpoint is misconfigured",
//!         FailureKind::Internal => "adapter bug",
//!     }
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod outcome;
pub mod race;
pub mod registry;
pub mod source;

pub use adapters::{
    AddressSource, DecodeFn, EndpointTemplate, FetchFuture, HttpAddressSource, ProviderProfile,
};
pub use domain::CanonicalAddress;
pub use error::ValidationError;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use outcome::{Decision, FailureKind, FailureReason, FetchOutcome, ProviderFailure};
pub use race::resolve;
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};
pub use source::ProviderId;

// Re-exported so adapters outside this crate can name the context type.
pub use tokio_util::sync::CancellationToken;
