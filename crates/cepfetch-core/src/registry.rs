use std::collections::HashSet;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{brasilapi, viacep, AddressSource, EndpointTemplate, HttpAddressSource};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{race, Decision, ProviderId, ValidationError};

pub const BRASIL_API_URL_ENV: &str = "CEPFETCH_BRASILAPI_URL";
pub const VIA_CEP_URL_ENV: &str = "CEPFETCH_VIACEP_URL";

/// Registered address sources, keyed by provenance and kept in registration order.
#[derive(Clone)]
pub struct ProviderRegistry {
    sources: Vec<Arc<dyn AddressSource>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}

impl ProviderRegistry {
    pub fn new(sources: Vec<Arc<dyn AddressSource>>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for source in &sources {
            let id = source.id();
            if !seen.insert(id.clone()) {
                return Err(ValidationError::DuplicateProvider {
                    provider: id.to_string(),
                });
            }
        }
        if sources.is_empty() {
            return Err(ValidationError::NoProviders);
        }
        Ok(Self { sources })
    }

    pub fn ids(&self) -> Vec<ProviderId> {
        self.sources.iter().map(|source| source.id()).collect()
    }

    pub fn get(&self, provider: &ProviderId) -> Option<Arc<dyn AddressSource>> {
        self.sources
            .iter()
            .find(|source| &source.id() == provider)
            .cloned()
    }

    /// Sources to race for `selection`; an empty selection means all of them.
    pub fn select(
        &self,
        selection: &[ProviderId],
    ) -> Result<Vec<Arc<dyn AddressSource>>, ValidationError> {
        if selection.is_empty() {
            return Ok(self.sources.clone());
        }

        let mut seen = HashSet::new();
        let mut selected = Vec::with_capacity(selection.len());
        for provider in selection {
            if !seen.insert(provider) {
                continue;
            }
            let source = self
                .get(provider)
                .ok_or_else(|| ValidationError::UnknownProvider {
                    provider: provider.to_string(),
                    known: self.known_ids(),
                })?;
            selected.push(source);
        }
        Ok(selected)
    }

    /// Races every registered source.
    pub async fn resolve(&self, identifier: &str, timeout: Duration) -> Decision {
        race::resolve(identifier, &self.sources, timeout).await
    }

    fn known_ids(&self) -> String {
        self.ids()
            .iter()
            .map(ProviderId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Builder for a [`ProviderRegistry`] over the built-in HTTP providers.
///
/// # Environment Variables
///
/// | Provider | Endpoint override |
/// |----------|-------------------|
/// | BrasilAPI | `CEPFETCH_BRASILAPI_URL` |
/// | ViaCEP | `CEPFETCH_VIACEP_URL` |
///
/// Overrides are endpoint templates containing `{cep}`.
///
/// # Example
///
/// ```rust,ignore
/// use cepfetch_core::ProviderRegistryBuilder;
///
/// let registry = ProviderRegistryBuilder::new()
///     .with_env_overrides()
///     .with_viacep_enabled(false)
///     .build()?;
/// ```
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    brasilapi_endpoint: Option<String>,
    viacep_endpoint: Option<String>,
    disable_brasilapi: bool,
    disable_viacep: bool,
    extra_sources: Vec<Arc<dyn AddressSource>>,
    unknown_endpoints: Vec<ProviderId>,
}

impl ProviderRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads endpoint overrides from the environment; unset or blank variables are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(template) = non_blank_env(BRASIL_API_URL_ENV) {
            self.brasilapi_endpoint = Some(template);
        }
        if let Some(template) = non_blank_env(VIA_CEP_URL_ENV) {
            self.viacep_endpoint = Some(template);
        }
        self
    }

    /// Overrides the endpoint template of a built-in provider.
    ///
    /// Templates for ids other than `brasilapi` and `viacep` are rejected at
    /// [`build`](Self::build) time.
    pub fn with_endpoint(mut self, provider: &ProviderId, template: impl Into<String>) -> Self {
        let template = template.into();
        match provider.as_str() {
            ProviderId::BRASIL_API => self.brasilapi_endpoint = Some(template),
            ProviderId::VIA_CEP => self.viacep_endpoint = Some(template),
            _ => self.unknown_endpoints.push(provider.clone()),
        }
        self
    }

    pub fn with_brasilapi_enabled(mut self, enabled: bool) -> Self {
        self.disable_brasilapi = !enabled;
        self
    }

    pub fn with_viacep_enabled(mut self, enabled: bool) -> Self {
        self.disable_viacep = !enabled;
        self
    }

    /// Transport shared by the built-in providers; defaults to [`ReqwestHttpClient`].
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Registers an additional source after the built-in ones.
    pub fn with_source(mut self, source: Arc<dyn AddressSource>) -> Self {
        self.extra_sources.push(source);
        self
    }

    pub fn build(self) -> Result<ProviderRegistry, ValidationError> {
        if let Some(provider) = self.unknown_endpoints.first() {
            return Err(ValidationError::UnknownProvider {
                provider: provider.to_string(),
                known: format!("{}, {}", ProviderId::BRASIL_API, ProviderId::VIA_CEP),
            });
        }

        let http_client = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));
        let mut sources: Vec<Arc<dyn AddressSource>> = Vec::new();

        if !self.disable_brasilapi {
            let mut profile = brasilapi::profile();
            if let Some(template) = self.brasilapi_endpoint {
                profile = profile.with_endpoint(EndpointTemplate::parse(template)?);
            }
            sources.push(Arc::new(HttpAddressSource::new(
                profile,
                Arc::clone(&http_client),
            )));
        }

        if !self.disable_viacep {
            let mut profile = viacep::profile();
            if let Some(template) = self.viacep_endpoint {
                profile = profile.with_endpoint(EndpointTemplate::parse(template)?);
            }
            sources.push(Arc::new(HttpAddressSource::new(
                profile,
                Arc::clone(&http_client),
            )));
        }

        sources.extend(self.extra_sources);

        ProviderRegistry::new(sources)
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
