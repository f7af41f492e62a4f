//! BrasilAPI (`brasilapi.com.br`) CEP v1 endpoint.

use serde::Deserialize;

use super::{null_as_empty, EndpointTemplate, ProviderProfile};
use crate::{CanonicalAddress, FailureReason, ProviderId};

pub const DEFAULT_ENDPOINT: &str = "https://brasilapi.com.br/api/cep/v1/{cep}";

#[derive(Debug, Deserialize)]
struct BrasilApiPayload {
    cep: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    street: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    neighborhood: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    state: String,
}

pub fn profile() -> ProviderProfile {
    ProviderProfile::new(
        ProviderId::brasil_api(),
        EndpointTemplate::from_static(DEFAULT_ENDPOINT),
        decode,
    )
}

pub fn decode(body: &str) -> Result<CanonicalAddress, FailureReason> {
    let payload: BrasilApiPayload = serde_json::from_str(body)
        .map_err(|error| FailureReason::decode(format!("brasilapi payload: {error}")))?;

    Ok(CanonicalAddress {
        postal_code: payload.cep,
        street: payload.street,
        neighborhood: payload.neighborhood,
        city: payload.city,
        state_code: payload.state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    #[test]
    fn default_endpoint_is_a_valid_template() {
        let parsed = EndpointTemplate::parse(DEFAULT_ENDPOINT).expect("valid template");
        assert_eq!(parsed, profile().endpoint);
    }

    #[test]
    fn decode_maps_native_fields() {
        let body = r#"{
            "cep": "01153000",
            "state": "SP",
            "city": "São Paulo",
            "neighborhood": "Barra Funda",
            "street": "Rua Vitorino Carmilo",
            "service": "open-cep"
        }"#;

        let address = decode(body).expect("valid payload");
        assert_eq!(
            address,
            CanonicalAddress::new(
                "01153000",
                "Rua Vitorino Carmilo",
                "Barra Funda",
                "São Paulo",
                "SP"
            )
        );
    }

    #[test]
    fn missing_and_null_fields_become_empty() {
        let address =
            decode(r#"{"cep":"69900000","street":null,"city":"Rio Branco","state":"AC"}"#)
                .expect("partial payload is valid");

        assert_eq!(address.street, "");
        assert_eq!(address.neighborhood, "");
        assert_eq!(address.city, "Rio Branco");
    }

    #[test]
    fn payload_without_cep_is_decode_failure() {
        let reason = decode(r#"{"street":"Rua X"}"#).expect_err("cep is required");
        assert_eq!(reason.kind(), FailureKind::Decode);

        let reason = decode("<html>bad gateway</html>").expect_err("not json");
        assert_eq!(reason.kind(), FailureKind::Decode);
    }
}
