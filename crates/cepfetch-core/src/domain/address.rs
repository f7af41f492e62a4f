use serde::{Deserialize, Serialize};

/// Provider-agnostic address record produced by every adapter.
///
/// Holding one of these means the originating fetch completed and decoded
/// cleanly. Fields other than `postal_code` may be empty when the provider
/// omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalAddress {
    /// Postal code as echoed by the provider; formatting may differ from the input.
    pub postal_code: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state_code: String,
}

impl CanonicalAddress {
    pub fn new(
        postal_code: impl Into<String>,
        street: impl Into<String>,
        neighborhood: impl Into<String>,
        city: impl Into<String>,
        state_code: impl Into<String>,
    ) -> Self {
        Self {
            postal_code: postal_code.into(),
            street: street.into(),
            neighborhood: neighborhood.into(),
            city: city.into(),
            state_code: state_code.into(),
        }
    }
}
