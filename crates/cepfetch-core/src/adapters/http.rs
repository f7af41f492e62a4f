use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{AddressSource, FetchFuture};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{CanonicalAddress, FailureReason, FetchOutcome, ProviderId, ValidationError};

/// Placeholder replaced by the percent-encoded identifier.
pub const PLACEHOLDER: &str = "{cep}";

/// Maps a provider's response body onto the canonical record.
pub type DecodeFn = fn(&str) -> Result<CanonicalAddress, FailureReason>;

/// URL pattern parameterized by the lookup identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    pub fn parse(template: impl Into<String>) -> Result<Self, ValidationError> {
        let template = template.into();
        let trimmed = template.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyEndpointTemplate);
        }
        if !trimmed.contains(PLACEHOLDER) {
            return Err(ValidationError::MissingPlaceholder {
                value: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Built-in templates are covered by tests instead of runtime validation.
    pub(crate) fn from_static(template: &'static str) -> Self {
        Self(String::from(template))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes `identifier` and checks the result is a well-formed URL.
    pub fn render(&self, identifier: &str) -> Result<String, FailureReason> {
        let url = self.0.replace(PLACEHOLDER, &urlencoding::encode(identifier));
        reqwest::Url::parse(&url).map_err(|error| {
            FailureReason::invalid_request(format!("invalid request url '{url}': {error}"))
        })?;
        Ok(url)
    }
}

/// Everything that distinguishes one HTTP provider from another.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub id: ProviderId,
    pub endpoint: EndpointTemplate,
    pub decode: DecodeFn,
}

impl ProviderProfile {
    pub fn new(id: ProviderId, endpoint: EndpointTemplate, decode: DecodeFn) -> Self {
        Self {
            id,
            endpoint,
            decode,
        }
    }

    pub fn with_endpoint(mut self, endpoint: EndpointTemplate) -> Self {
        self.endpoint = endpoint;
        self
    }
}

/// HTTP-backed address source shared by every provider profile.
#[derive(Clone)]
pub struct HttpAddressSource {
    profile: ProviderProfile,
    http_client: Arc<dyn HttpClient>,
}

impl HttpAddressSource {
    pub fn new(profile: ProviderProfile, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            profile,
            http_client,
        }
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }
}

impl AddressSource for HttpAddressSource {
    fn id(&self) -> ProviderId {
        self.profile.id.clone()
    }

    fn fetch<'a>(&'a self, identifier: &'a str, ctx: &'a CancellationToken) -> FetchFuture<'a> {
        Box::pin(async move {
            let provenance = self.id();
            if ctx.is_cancelled() {
                debug!(provider = %provenance, "skipping fetch, race already decided");
                return None;
            }

            let url = match self.profile.endpoint.render(identifier) {
                Ok(url) => url,
                Err(reason) => return Some(FetchOutcome::failed(provenance, reason)),
            };
            let request = HttpRequest::get(url).with_header("accept", "application/json");

            let response = tokio::select! {
                biased;
                () = ctx.cancelled() => {
                    debug!(provider = %provenance, "fetch cancelled in flight");
                    return None;
                }
                response = self.http_client.execute(request) => response,
            };

            let result = match response {
                Err(error) => Err(FailureReason::transport(format!(
                    "{provenance} transport error: {}",
                    error.message()
                ))),
                Ok(response) if !response.is_success() => {
                    Err(FailureReason::remote_status(response.status))
                }
                Ok(response) => (self.profile.decode)(&response.body),
            };

            Some(FetchOutcome {
                provenance,
                result,
            })
        })
    }
}
