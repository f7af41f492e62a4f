use std::sync::Arc;
use std::time::Duration;

use cepfetch_core::adapters::{brasilapi, viacep};
use cepfetch_core::{
    AddressSource, CanonicalAddress, CancellationToken, EndpointTemplate, FailureKind,
    HttpAddressSource, ProviderId, ProviderProfile, ReqwestHttpClient,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct ProviderCase {
    id: ProviderId,
    profile: ProviderProfile,
    /// Path under the mock server, with `{cep}` still in place.
    route: &'static str,
    success_body: &'static str,
    expected: CanonicalAddress,
}

fn provider_cases() -> Vec<ProviderCase> {
    vec![
        ProviderCase {
            id: ProviderId::brasil_api(),
            profile: brasilapi::profile(),
            route: "/api/cep/v1/{cep}",
            success_body: r#"{"cep":"01153000","state":"SP","city":"São Paulo","neighborhood":"Barra Funda","street":"Rua Vitorino Carmilo","service":"viacep"}"#,
            expected: CanonicalAddress::new(
                "01153000",
                "Rua Vitorino Carmilo",
                "Barra Funda",
                "São Paulo",
                "SP",
            ),
        },
        ProviderCase {
            id: ProviderId::via_cep(),
            profile: viacep::profile(),
            route: "/ws/{cep}/json/",
            success_body: r#"{"cep":"01153-000","logradouro":"Rua Vitorino Carmilo","complemento":"","bairro":"Barra Funda","localidade":"São Paulo","uf":"SP","ibge":"3550308","gia":"1004","ddd":"11","siafi":"7107"}"#,
            expected: CanonicalAddress::new(
                "01153-000",
                "Rua Vitorino Carmilo",
                "Barra Funda",
                "São Paulo",
                "SP",
            ),
        },
    ]
}

/// Short connect timeout so an unreachable host fails fast.
fn contract_client() -> ReqwestHttpClient {
    ReqwestHttpClient::with_client(
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .build()
            .expect("reqwest client builds"),
    )
}

fn source_for(case: &ProviderCase, server: &MockServer) -> HttpAddressSource {
    let template = EndpointTemplate::parse(format!("{}{}", server.uri(), case.route))
        .expect("mock template is valid");
    HttpAddressSource::new(
        case.profile.clone().with_endpoint(template),
        Arc::new(contract_client()),
    )
}

fn route_path(case: &ProviderCase, cep: &str) -> String {
    case.route.replace("{cep}", cep)
}

#[tokio::test]
async fn success_payload_maps_to_canonical_address_for_all_providers() {
    for case in provider_cases() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route_path(&case, "01153000")))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(case.success_body))
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&case, &server);
        let outcome = source
            .fetch("01153000", &CancellationToken::new())
            .await
            .unwrap_or_else(|| panic!("provider '{}' reported nothing", case.id));

        assert_eq!(outcome.provenance, case.id);
        let address = outcome
            .result
            .unwrap_or_else(|reason| panic!("provider '{}' failed: {reason}", case.id));
        assert_eq!(address, case.expected, "provider '{}': address", case.id);
    }
}

#[tokio::test]
async fn server_error_is_remote_failure_for_all_providers() {
    for case in provider_cases() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let outcome = source_for(&case, &server)
            .fetch("01153000", &CancellationToken::new())
            .await
            .expect("reports");

        let reason = outcome.result.expect_err("500 must fail");
        assert_eq!(reason.kind(), FailureKind::Remote, "provider '{}'", case.id);
        assert_eq!(reason.status(), Some(500), "provider '{}'", case.id);
    }
}

#[tokio::test]
async fn malformed_body_is_decode_failure_for_all_providers() {
    for case in provider_cases() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"cep\": 01153"))
            .mount(&server)
            .await;

        let outcome = source_for(&case, &server)
            .fetch("01153000", &CancellationToken::new())
            .await
            .expect("reports");

        let reason = outcome.result.expect_err("truncated json must fail");
        assert_eq!(reason.kind(), FailureKind::Decode, "provider '{}'", case.id);
    }
}

#[tokio::test]
async fn identifier_is_passed_through_unvalidated() {
    for case in provider_cases() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route_path(&case, "abc")))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = source_for(&case, &server)
            .fetch("abc", &CancellationToken::new())
            .await
            .expect("reports");

        assert_eq!(
            outcome.result.expect_err("400").status(),
            Some(400),
            "provider '{}'",
            case.id
        );
    }
}

#[tokio::test]
async fn viacep_not_found_flag_is_remote_failure() {
    let case = provider_cases()
        .into_iter()
        .find(|case| case.id == ProviderId::via_cep())
        .expect("viacep case");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"erro": true}"#))
        .mount(&server)
        .await;

    let outcome = source_for(&case, &server)
        .fetch("99999999", &CancellationToken::new())
        .await
        .expect("reports");

    let reason = outcome.result.expect_err("unknown cep");
    assert_eq!(reason.kind(), FailureKind::Remote);
    assert_eq!(reason.status(), None);
}

#[tokio::test]
async fn unreachable_host_is_transport_failure() {
    let template =
        EndpointTemplate::parse("http://127.0.0.1:9/cep/{cep}").expect("valid template");
    let source = HttpAddressSource::new(
        brasilapi::profile().with_endpoint(template),
        Arc::new(contract_client()),
    );

    let outcome = source
        .fetch("01153000", &CancellationToken::new())
        .await
        .expect("reports");

    assert_eq!(
        outcome.result.expect_err("nothing listens on port 9").kind(),
        FailureKind::Transport
    );
}
