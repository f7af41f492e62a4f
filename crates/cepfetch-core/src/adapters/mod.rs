//! Provider adapters.
//!
//! Every provider is reached through [`HttpAddressSource`], parameterized by a
//! [`ProviderProfile`]: an endpoint template plus a function mapping the
//! provider's native JSON onto [`CanonicalAddress`](crate::CanonicalAddress).
//!
//! | Module | Provider | Native schema |
//! |--------|----------|---------------|
//! | [`brasilapi`] | BrasilAPI | `cep`, `street`, `neighborhood`, `city`, `state` |
//! | [`viacep`] | ViaCEP | `cep`, `logradouro`, `bairro`, `localidade`, `uf` |

pub mod brasilapi;
mod http;
pub mod viacep;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Deserializer};
use tokio_util::sync::CancellationToken;

use crate::{FetchOutcome, ProviderId};

pub use http::{DecodeFn, EndpointTemplate, HttpAddressSource, ProviderProfile, PLACEHOLDER};

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Option<FetchOutcome>> + Send + 'a>>;

/// Address provider contract raced by the coordinator.
///
/// # Cancellation
///
/// `fetch` must watch `ctx` at its I/O boundary. When the token is cancelled
/// before the fetch completes, the future resolves to `None` and nothing is
/// reported. Otherwise it resolves to exactly one [`FetchOutcome`] whose
/// provenance is [`id`](AddressSource::id).
///
/// Failures of any kind are returned inside the outcome; implementations do
/// not panic on bad input or bad responses.
pub trait AddressSource: Send + Sync {
    /// Provenance name reported with every outcome.
    fn id(&self) -> ProviderId;

    fn fetch<'a>(&'a self, identifier: &'a str, ctx: &'a CancellationToken) -> FetchFuture<'a>;
}

/// Treats JSON `null` like a missing field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
