use thiserror::Error;

/// Validation and configuration errors exposed by `cepfetch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("provider id cannot be empty")]
    EmptyProviderId,
    #[error("provider id length {len} exceeds max {max}")]
    ProviderIdTooLong { len: usize, max: usize },
    #[error("provider id contains invalid character '{ch}' at index {index}")]
    ProviderIdInvalidChar { ch: char, index: usize },

    #[error("endpoint template cannot be empty")]
    EmptyEndpointTemplate,
    #[error("endpoint template '{value}' must contain the {{cep}} placeholder")]
    MissingPlaceholder { value: String },

    #[error("provider '{provider}' is registered more than once")]
    DuplicateProvider { provider: String },
    #[error("unknown provider '{provider}', expected one of: {known}")]
    UnknownProvider { provider: String, known: String },
    #[error("at least one provider must be enabled")]
    NoProviders,
}
