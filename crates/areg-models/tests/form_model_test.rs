//! RecordFormModel against a mock register backend.

use std::sync::Arc;

use areg_client::{ApiClient, ClientConfig, ErrorKind};
use areg_core::{RecordId, Route, Session, VerificationMethod};
use areg_models::{FormError, FormMode, RecordFormModel};
use areg_session::{MemorySessionStore, NoopNavigator};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> ApiClient {
    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "abc", "thandi", "thandi@example.com", "",
    )));
    let config = ClientConfig::new(mock_server.uri().parse().unwrap());
    ApiClient::new(config, store, Arc::new(NoopNavigator)).unwrap()
}

fn saved(id: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "code": code,
        "fullNames": "Thandi Mokoena",
        "identityNumber": "8001015009087",
        "verificationMethod": "Other Official Document",
        "otherVerification": "",
        "telephoneNumbers": ["012", "013"],
        "vehicleRegistration": "",
        "contactAddress": "",
        "goodsDescription": "",
        "additionalNotes": "",
        "createdAt": "2025-03-01T09:30:00Z"
    })
}

async fn mount_next_code(mock_server: &MockServer, code: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/records/next-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": code})))
        .expect(times)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn create_form_fetches_code_once() {
    let mock_server = MockServer::start().await;
    mount_next_code(&mock_server, "AR-0010", 1).await;

    let mut form = RecordFormModel::for_create(test_client(&mock_server))
        .await
        .unwrap();
    assert!(form.can_submit());
    assert_eq!(form.draft().code().unwrap().as_str(), "AR-0010");

    // A second fetch reuses the held code.
    assert_eq!(form.fetch_code().await.unwrap().as_str(), "AR-0010");
}

#[tokio::test]
async fn create_accepts_other_method_with_empty_document() {
    let mock_server = MockServer::start().await;
    mount_next_code(&mock_server, "AR-0010", 1).await;

    Mock::given(method("POST"))
        .and(path("/records"))
        .and(body_json(serde_json::json!({
            "code": "AR-0010",
            "fullNames": "Thandi Mokoena",
            "identityNumber": "8001015009087",
            "verificationMethod": "Other Official Document",
            "otherVerification": "",
            "telephoneNumbers": ["012", "013"],
            "vehicleRegistration": "",
            "contactAddress": "",
            "goodsDescription": "",
            "additionalNotes": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(saved("r10", "AR-0010")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut form = RecordFormModel::for_create(test_client(&mock_server))
        .await
        .unwrap();
    form.set_field("fullNames", "Thandi Mokoena").unwrap();
    form.set_field("identityNumber", "8001015009087").unwrap();
    form.set_field("verificationMethod", "Other Official Document")
        .unwrap();
    assert!(form.other_verification_visible());
    form.set_phone(0, "012").unwrap();
    form.add_phone();
    form.set_phone(1, "013").unwrap();

    let submitted = form.submit().await.unwrap();
    assert_eq!(submitted.record.id.as_str(), "r10");
    assert_eq!(
        submitted.route,
        Route::RecordDetail {
            id: RecordId::new("r10")
        }
    );
}

#[tokio::test]
async fn failed_submit_preserves_draft() {
    let mock_server = MockServer::start().await;
    mount_next_code(&mock_server, "AR-0011", 1).await;

    Mock::given(method("POST"))
        .and(path("/records"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"message": "identityNumber is required"})),
        )
        .mount(&mock_server)
        .await;

    let mut form = RecordFormModel::for_create(test_client(&mock_server))
        .await
        .unwrap();
    form.set_field("fullNames", "Sipho Dlamini").unwrap();
    let before = form.draft().clone();

    match form.submit().await {
        Err(FormError::Api(e)) => {
            assert_eq!(e.kind(), ErrorKind::Validation);
            assert_eq!(e.user_message(), "identityNumber is required");
        }
        other => panic!("expected API error, got: {other:?}"),
    }
    assert_eq!(form.draft(), &before);
    assert!(form.can_submit());
}

#[tokio::test]
async fn code_fetch_failure_keeps_submit_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/records/next-code"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut form = RecordFormModel::new_create(test_client(&mock_server));
    assert!(form.fetch_code().await.is_err());
    assert!(!form.can_submit());
    assert!(matches!(form.submit().await, Err(FormError::CodePending)));
}

#[tokio::test]
async fn edit_round_trips_server_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/records/r10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(saved("r10", "AR-0010")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut expected = saved("r10", "AR-0010");
    let body = expected.as_object_mut().unwrap();
    body.remove("_id");
    body.insert("verificationMethod".into(), serde_json::json!("Passport"));
    body.insert("contactAddress".into(), serde_json::json!("4 Main Road"));

    Mock::given(method("PUT"))
        .and(path("/records/r10"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(saved("r10", "AR-0010")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut form = RecordFormModel::for_edit(test_client(&mock_server), RecordId::new("r10"))
        .await
        .unwrap();
    assert_eq!(
        form.mode(),
        &FormMode::Edit {
            id: RecordId::new("r10")
        }
    );
    assert!(form.can_submit());
    assert!(form.set_field("createdAt", "2030-01-01T00:00:00Z").is_err());
    form.set_field("verificationMethod", "Passport").unwrap();
    form.set_field("contactAddress", "4 Main Road").unwrap();
    assert_eq!(
        form.draft().verification_method,
        Some(VerificationMethod::Passport)
    );

    let submitted = form.submit().await.unwrap();
    assert_eq!(submitted.record.code.as_str(), "AR-0010");
}

#[tokio::test]
async fn edit_of_missing_record_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/records/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = RecordFormModel::for_edit(test_client(&mock_server), RecordId::new("gone"))
        .await
        .unwrap_err();
    match err {
        FormError::Api(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("expected not found, got: {other:?}"),
    }
}
