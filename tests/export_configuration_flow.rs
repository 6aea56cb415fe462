//! Integration tests for the export configuration endpoint using wiremock.
//!
//! - GET /appsec/v1/export/configs/{configId}/versions/{version}

use edge_api::auth::Unsigned;
use edge_api::client::EdgeClient;
use edge_api::error::EdgeError;
use edge_api::export_configuration::*;
use reqwest::StatusCode;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_client(server: &MockServer) -> EdgeClient {
    EdgeClient::with_base_url(Unsigned, &server.uri()).unwrap()
}

#[tokio::test]
async fn export_returns_populated_configuration() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/appsec/v1/export/configs/43253/versions/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "configId": 43253,
            "configName": "Example Security Config",
            "version": 7,
            "basedOn": 6,
            "staging": {"status": "Active"},
            "production": {"status": "Inactive"},
            "createDate": "2020-07-07T16:49:14Z",
            "createdBy": "user1",
            "selectedHosts": ["www.example.com", "shop.example.com"],
            "selectableHosts": [],
            "reputationProfiles": [{
                "id": 2034,
                "name": "Web Attackers",
                "context": "WEBATCK",
                "contextReadable": "Web Attackers",
                "enabled": true,
                "threshold": 5
            }],
            "securityPolicies": [{
                "id": "PLCY_12345",
                "name": "Default Policy",
                "securityControls": {"applyRateControls": true}
            }],
            "advancedOptions": {
                "prefetch": {"enableAppLayer": true, "extensions": ["cgi", "jsp"]}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let export = get_export_configuration(
        &client,
        &GetExportConfigurationRequest {
            config_id: 43253,
            version: 7,
        },
    )
    .await
    .unwrap();

    assert_eq!(export.config_id, 43253);
    assert_eq!(export.config_name, "Example Security Config");
    assert_eq!(export.version, 7);
    assert_eq!(export.based_on, 6);
    assert_eq!(export.staging.status, "Active");
    assert_eq!(export.selected_hosts.len(), 2);
    assert_eq!(export.reputation_profiles[0].context, "WEBATCK");
    assert!(export.security_policies[0].security_controls.apply_rate_controls);
    assert!(export.advanced_options.prefetch.enable_app_layer);
    assert!(export.rate_policies.is_empty());
}

#[tokio::test]
async fn export_not_found_is_api_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/appsec/v1/export/configs/1/versions/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "title": "Not Found",
            "detail": "Version 99 does not exist",
            "status": 404
        })))
        .mount(&server)
        .await;

    let err = get_export_configuration(
        &client,
        &GetExportConfigurationRequest {
            config_id: 1,
            version: 99,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    let msg = err.to_string();
    assert!(msg.contains("404"), "error should include status, got: {msg}");
    assert!(msg.contains("Version 99 does not exist"));
}

#[tokio::test]
async fn export_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/appsec/v1/export/configs/1/versions/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = get_export_configuration(
        &client,
        &GetExportConfigurationRequest {
            config_id: 1,
            version: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EdgeError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn export_zero_config_fails_before_request() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = get_export_configuration(
        &client,
        &GetExportConfigurationRequest {
            config_id: 0,
            version: 0,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, EdgeError::Validation(_)), "got {err:?}");
    assert_eq!(err.invalid_fields(), vec!["config_id", "version"]);
}
