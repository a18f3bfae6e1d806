mod common;

use std::fs;
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use sprier_cert_server::{configure_api, AppState};

use common::{
    test_config, valid_certificate_body, valid_service_body, FailingRenderer, MockRenderer,
    STUB_PDF,
};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(configure_api),
        )
        .await
    };
}

fn mock_state(data_dir: &std::path::Path) -> web::Data<AppState> {
    web::Data::new(AppState::with_renderer(
        test_config(data_dir),
        Arc::new(MockRenderer),
    ))
}

#[actix_web::test]
async fn test_create_certificate_returns_201_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/certificates/generateCertificate")
        .set_json(valid_certificate_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let certificate_id = body["certificateId"].as_str().unwrap();
    assert!(certificate_id.starts_with("CERT-"));
    assert_eq!(body["message"], "Certificate generated successfully!");
    assert_eq!(
        body["downloadUrl"],
        format!("/api/v1/certificates/download/{certificate_id}")
    );

    let pdf_path = dir
        .path()
        .join("certificates")
        .join(format!("{certificate_id}.pdf"));
    assert!(pdf_path.exists());

    // The store's generated id matches the response.
    assert!(state.store.find_certificate(certificate_id).is_some());
    assert_eq!(
        state
            .metrics
            .documents_generated
            .with_label_values(&["certificate"])
            .get(),
        1
    );
}

#[actix_web::test]
async fn test_create_certificate_missing_field_is_400_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let mut body = valid_certificate_body();
    body.as_object_mut().unwrap().remove("customerName");

    let req = test::TestRequest::post()
        .uri("/api/v1/certificates/generateCertificate")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("customerName"));
    assert!(!dir.path().join("certificates").exists());
}

#[actix_web::test]
async fn test_create_certificate_empty_observations_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let mut body = valid_certificate_body();
    body["observations"] = serde_json::json!([]);

    let req = test::TestRequest::post()
        .uri("/api/v1/certificates/generateCertificate")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_certificate_roundtrip_download() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/certificates/generateCertificate")
        .set_json(valid_certificate_body())
        .to_request();
    let body: serde_json::Value =
        test::call_and_read_body_json(&app, req).await;
    let download_url = body["downloadUrl"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri(&download_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(".pdf"));

    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], STUB_PDF);
}

#[actix_web::test]
async fn test_download_unknown_certificate_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/certificates/download/CERT-does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Certificate not found");
}

#[actix_web::test]
async fn test_render_failure_is_500_and_rolls_back_record() {
    let dir = tempfile::tempdir().unwrap();
    let state = web::Data::new(AppState::with_renderer(
        test_config(dir.path()),
        Arc::new(FailingRenderer),
    ));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/certificates/generateCertificate")
        .set_json(valid_certificate_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate certificate"));
    assert!(!dir.path().join("certificates").exists());
    assert_eq!(state.store.certificate_count(), 0);
}

#[actix_web::test]
async fn test_service_render_failure_is_500_and_rolls_back_record() {
    let dir = tempfile::tempdir().unwrap();
    let state = web::Data::new(AppState::with_renderer(
        test_config(dir.path()),
        Arc::new(FailingRenderer),
    ));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/services/generateService")
        .set_json(valid_service_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate service"));
    assert!(!dir.path().join("services").exists());
    assert_eq!(state.store.service_count(), 0);
}

#[actix_web::test]
async fn test_create_service_returns_201_and_normalizes_quantity() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/services/generateService")
        .set_json(valid_service_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let service_id = body["serviceId"].as_str().unwrap();
    assert!(service_id.starts_with("SERV-"));

    let record = state.store.find_service(service_id).unwrap();
    // "5.0" was submitted; the canonical decimal form is stored.
    assert_eq!(record.engineer_remarks[0].quantity, "5");
    assert!(dir
        .path()
        .join("services")
        .join(format!("{service_id}.pdf"))
        .exists());
    assert_eq!(
        state
            .metrics
            .documents_generated
            .with_label_values(&["service"])
            .get(),
        1
    );
}

#[actix_web::test]
async fn test_create_service_non_numeric_quantity_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let mut body = valid_service_body();
    body["engineerRemarks"][0]["quantity"] = serde_json::json!("five");

    let req = test::TestRequest::post()
        .uri("/api/v1/services/generateService")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("engineerRemarks[0].quantity"));
    assert!(!dir.path().join("services").exists());
}

#[actix_web::test]
async fn test_create_service_blank_field_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let mut body = valid_service_body();
    body["contactPerson"] = serde_json::json!("   ");

    let req = test::TestRequest::post()
        .uri("/api/v1/services/generateService")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_download_unknown_service_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/services/download/SERV-does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Service not found");
}

#[actix_web::test]
async fn test_download_service_with_missing_file_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/services/generateService")
        .set_json(valid_service_body())
        .to_request();
    let body: serde_json::Value =
        test::call_and_read_body_json(&app, req).await;
    let service_id = body["serviceId"].as_str().unwrap().to_string();

    // Record exists but the backing file disappeared.
    fs::remove_file(
        dir.path()
            .join("services")
            .join(format!("{service_id}.pdf")),
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/services/download/{service_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Service PDF file not found");
}

#[actix_web::test]
async fn test_service_download_streams_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let state = mock_state(dir.path());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/services/generateService")
        .set_json(valid_service_body())
        .to_request();
    let body: serde_json::Value =
        test::call_and_read_body_json(&app, req).await;
    let service_id = body["serviceId"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/services/download/{service_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains(&format!("service-{service_id}.pdf")));
}
