// agrirent/tests/request_body_tests.rs

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use agrirent::config::AppConfig;
use agrirent::state::AppState;
use agrirent::store::collections::EQUIPMENT;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{bearer, equipment_form, setup_tracing, test_state};
use serde_json::json;

#[actix_web::test]
async fn phone_sized_photo_is_accepted() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let photo = vec![0xFFu8; 3 * 1024 * 1024];
  let mut form = equipment_form("Tractor A", "Tractor");
  form["image"] = json!({ "fileName": "tractor.jpg", "contentType": "image/jpeg", "data": STANDARD.encode(&photo) });
  let (status, body) = call_json!(
    app,
    TestRequest::post().uri("/api/v1/equipment").insert_header(bearer(&token)).set_json(form)
  );
  assert_eq!(status, StatusCode::CREATED, "{}", body["message"]);

  let url = body["equipment"]["imageUrl"].as_str().unwrap();
  let path = url.split_once("/files/").map(|(_, p)| p).unwrap();
  let stored = state.objects.fetch(path).await.unwrap().unwrap();
  assert_eq!(stored.bytes.len(), photo.len());
  assert_eq!(stored.content_type, "image/jpeg");
}

#[actix_web::test]
async fn body_over_the_configured_limit_gets_a_json_413() {
  setup_tracing();
  let state = AppState::in_memory(AppConfig {
    max_upload_bytes: 4 * 1024,
    ..AppConfig::default()
  });
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let mut form = equipment_form("Tractor A", "Tractor");
  form["image"] = json!({ "data": STANDARD.encode(vec![7u8; 8 * 1024]) });
  let (status, body) = call_json!(
    app,
    TestRequest::post().uri("/api/v1/equipment").insert_header(bearer(&token)).set_json(form)
  );
  assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
  assert_eq!(body["error"], "payload_too_large");
  assert!(body["message"].as_str().unwrap().contains("4096"));
  assert!(state.documents.fetch_all(EQUIPMENT).await.unwrap().is_empty());
}

#[actix_web::test]
async fn mistyped_field_is_a_json_validation_error() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let (status, body) = call_json!(
    app,
    TestRequest::post()
      .uri("/api/v1/equipment")
      .insert_header(bearer(&token))
      .set_json(json!({ "name": 5, "price": "50", "location": "Accra" }))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "validation");
  assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
  assert_eq!(body["fields"], json!([]));
}

#[actix_web::test]
async fn malformed_json_is_a_json_validation_error() {
  let state = test_state();
  let app = init_app!(state);

  let (status, body) = call_json!(
    app,
    TestRequest::post()
      .uri("/api/v1/auth/signin")
      .insert_header(("Content-Type", "application/json"))
      .set_payload("{\"email\": ")
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "validation");
}

#[actix_web::test]
async fn non_numeric_days_is_a_json_validation_error() {
  let state = test_state();
  let app = init_app!(state);

  let (status, body) = call_json!(app, TestRequest::get().uri("/api/v1/equipment/E1/order?days=abc"));
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "validation");
  assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));
}
