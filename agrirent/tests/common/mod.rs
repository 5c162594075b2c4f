// agrirent/tests/common/mod.rs
#![allow(dead_code, unused_macros)]

use agrirent::config::AppConfig;
use agrirent::state::AppState;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing::Level;

pub static TRACING: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

/// Fresh in-memory backends with every flow registered.
pub fn test_state() -> AppState {
  setup_tracing();
  AppState::in_memory(AppConfig::default())
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

pub fn equipment_form(name: &str, category: &str) -> Value {
  json!({
    "name": name,
    "description": "Well maintained.",
    "price": "250",
    "location": "Kumasi",
    "category": category,
    "hirerName": "Ama Owusu",
    "hirerPhone": "0241112222",
    "hirerEmail": "ama@example.com",
  })
}

/// Builds the service for `$state` with the full route table.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(agrirent::web::configure_app($state.config.max_upload_bytes)),
    )
    .await
  };
}

/// Sends a `TestRequest` and returns the status with the JSON body.
macro_rules! call_json {
  ($app:expr, $req:expr) => {{
    let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
    let status = resp.status();
    let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
    (status, body)
  }};
}

/// Signs up through the API and returns `(token, uid)`.
macro_rules! sign_up {
  ($app:expr, $email:expr, $password:expr) => {{
    let (status, body) = call_json!(
      $app,
      actix_web::test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(serde_json::json!({ "email": $email, "password": $password, "displayName": "Test Farmer" }))
    );
    assert_eq!(status, actix_web::http::StatusCode::CREATED, "signup failed: {}", body);
    (
      body["token"].as_str().unwrap().to_string(),
      body["user"]["uid"].as_str().unwrap().to_string(),
    )
  }};
}
