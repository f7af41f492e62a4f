//! ViaCEP (`viacep.com.br`) JSON web service.
//!
//! ViaCEP answers a well-formed but unknown CEP with `200 OK` and
//! `{"erro": true}` (older deployments send the string `"true"`), so that
//! body is mapped to a remote failure before schema decoding.

use serde::Deserialize;
use serde_json::Value;

use super::{null_as_empty, EndpointTemplate, ProviderProfile};
use crate::{CanonicalAddress, FailureReason, ProviderId};

pub const DEFAULT_ENDPOINT: &str = "https://viacep.com.br/ws/{cep}/json/";

#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    erro: Option<Value>,
    cep: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    logradouro: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    bairro: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    localidade: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    uf: String,
}

impl ViaCepPayload {
    fn flags_not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

pub fn profile() -> ProviderProfile {
    ProviderProfile::new(
        ProviderId::via_cep(),
        EndpointTemplate::from_static(DEFAULT_ENDPOINT),
        decode,
    )
}

pub fn decode(body: &str) -> Result<CanonicalAddress, FailureReason> {
    let payload: ViaCepPayload = serde_json::from_str(body)
        .map_err(|error| FailureReason::decode(format!("viacep payload: {error}")))?;

    if payload.flags_not_found() {
        return Err(FailureReason::remote("postal code not found"));
    }

    let Some(postal_code) = payload.cep else {
        return Err(FailureReason::decode("viacep payload: missing field `cep`"));
    };

    Ok(CanonicalAddress {
        postal_code,
        street: payload.logradouro,
        neighborhood: payload.bairro,
        city: payload.localidade,
        state_code: payload.uf,
    })
}
