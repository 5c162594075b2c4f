// agrirent/tests/equipment_api_tests.rs

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use agrirent::store::collections::EQUIPMENT;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{bearer, equipment_form, test_state};
use serde_json::{json, Value};

fn names(list: &Value) -> Vec<String> {
  list
    .as_array()
    .expect("expected a JSON array")
    .iter()
    .map(|e| e["name"].as_str().unwrap_or_default().to_string())
    .collect()
}

#[actix_web::test]
async fn posted_listing_shows_in_my_posts_and_the_unfiltered_feed() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let (status, body) = call_json!(
    app,
    TestRequest::post()
      .uri("/api/v1/equipment")
      .insert_header(bearer(&token))
      .set_json(json!({ "name": "Plow X", "price": "50", "location": "Accra" }))
  );
  assert_eq!(status, StatusCode::CREATED, "{}", body);
  assert_eq!(body["equipment"]["userId"], "U1");
  assert_eq!(body["equipment"]["imageUrl"], "");
  assert_eq!(body["alert"]["message"], "Equipment posted successfully!");
  assert_eq!(body["next"]["action"], "navigate");
  assert_eq!(body["next"]["screen"], "Home");
  let id = body["equipment"]["id"].as_str().unwrap().to_string();
  assert!(!id.is_empty());

  let (status, mine) = call_json!(app, TestRequest::get().uri("/api/v1/my/equipment").insert_header(bearer(&token)));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(names(&mine["equipment"]), vec!["Plow X"]);
  assert_eq!(mine["edit"][0]["params"]["postId"], id.as_str());

  let (status, feed) = call_json!(app, TestRequest::get().uri("/api/v1/equipment"));
  assert_eq!(status, StatusCode::OK);
  assert!(names(&feed["equipment"]).contains(&"Plow X".to_string()));
}

#[actix_web::test]
async fn missing_required_field_is_rejected_without_writing() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let mut form = equipment_form("Baler 2", "Baler");
  form["location"] = json!("   ");
  let (status, body) = call_json!(
    app,
    TestRequest::post().uri("/api/v1/equipment").insert_header(bearer(&token)).set_json(form)
  );

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "validation");
  assert_eq!(body["fields"][0]["field"], "location");
  assert!(state.documents.fetch_all(EQUIPMENT).await.unwrap().is_empty());
}

#[actix_web::test]
async fn posting_requires_a_session() {
  let state = test_state();
  let app = init_app!(state);

  let (status, body) = call_json!(
    app,
    TestRequest::post().uri("/api/v1/equipment").set_json(equipment_form("Tractor A", "Tractor"))
  );
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"], "auth");
  assert!(state.documents.fetch_all(EQUIPMENT).await.unwrap().is_empty());
}

#[actix_web::test]
async fn unknown_category_is_a_validation_error() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let (status, body) = call_json!(
    app,
    TestRequest::post()
      .uri("/api/v1/equipment")
      .insert_header(bearer(&token))
      .set_json(equipment_form("Hover Tractor", "Spaceship"))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["fields"][0]["field"], "category");
}

#[actix_web::test]
async fn search_is_case_insensitive_and_blank_search_returns_everything() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");
  for (name, category) in [("John Deere 5075E", "Tractor"), ("Massey Ferguson", "Tractor"), ("Disc Plow", "Plow")] {
    let (status, _) = call_json!(
      app,
      TestRequest::post()
        .uri("/api/v1/equipment")
        .insert_header(bearer(&token))
        .set_json(equipment_form(name, category))
    );
    assert_eq!(status, StatusCode::CREATED);
  }

  let (_, body) = call_json!(app, TestRequest::get().uri("/api/v1/equipment?search=DEERE"));
  assert_eq!(names(&body["equipment"]), vec!["John Deere 5075E"]);
  assert_eq!(body["search"], "DEERE");

  let (_, body) = call_json!(app, TestRequest::get().uri("/api/v1/equipment?search="));
  assert_eq!(body["equipment"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn category_chip_toggles_on_and_off() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");
  for (name, category) in [("Tractor A", "Tractor"), ("Sprayer B", "Sprayer")] {
    call_json!(
      app,
      TestRequest::post()
        .uri("/api/v1/equipment")
        .insert_header(bearer(&token))
        .set_json(equipment_form(name, category))
    );
  }

  let (_, body) = call_json!(app, TestRequest::get().uri("/api/v1/equipment?toggle=Sprayer"));
  assert_eq!(body["selectedCategory"], "Sprayer");
  assert_eq!(names(&body["equipment"]), vec!["Sprayer B"]);

  let (_, body) = call_json!(app, TestRequest::get().uri("/api/v1/equipment?category=Sprayer&toggle=Sprayer"));
  assert_eq!(body["selectedCategory"], Value::Null);
  assert_eq!(body["equipment"].as_array().unwrap().len(), 2);

  let (_, body) = call_json!(app, TestRequest::get().uri("/api/v1/equipment?category=Sprayer&toggle=Tractor"));
  assert_eq!(names(&body["equipment"]), vec!["Tractor A"]);
}

#[actix_web::test]
async fn categories_route_is_not_taken_for_an_id() {
  let state = test_state();
  let app = init_app!(state);

  let (status, body) = call_json!(app, TestRequest::get().uri("/api/v1/equipment/categories"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["categories"][0], "Tractor");
}

#[actix_web::test]
async fn details_carry_contact_and_a_booking_intent() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");
  let (_, posted) = call_json!(
    app,
    TestRequest::post()
      .uri("/api/v1/equipment")
      .insert_header(bearer(&token))
      .set_json(equipment_form("Harvester 9", "Harvester"))
  );
  let id = posted["equipment"]["id"].as_str().unwrap().to_string();

  let (status, body) = call_json!(app, TestRequest::get().uri(&format!("/api/v1/equipment/{}", id)));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["equipment"]["name"], "Harvester 9");
  assert_eq!(body["contact"]["hirerPhone"], "0241112222");
  assert_eq!(body["book"]["screen"], "OrderDetails");

  let (status, _) = call_json!(app, TestRequest::get().uri("/api/v1/equipment/does-not-exist"));
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn order_quote_multiplies_the_daily_rate() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");
  let (_, posted) = call_json!(
    app,
    TestRequest::post()
      .uri("/api/v1/equipment")
      .insert_header(bearer(&token))
      .set_json(equipment_form("Tractor A", "Tractor"))
  );
  let id = posted["equipment"]["id"].as_str().unwrap().to_string();

  let (status, body) = call_json!(app, TestRequest::get().uri(&format!("/api/v1/equipment/{}/order?days=3", id)));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["order"]["days"], 3);
  assert_eq!(body["order"]["totalCost"], 750.0);
  assert_eq!(body["order"]["baseCostPerDay"], "250");

  let (status, _) = call_json!(app, TestRequest::get().uri(&format!("/api/v1/equipment/{}/order?days=0", id)));
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn owner_can_edit_and_others_are_forbidden() {
  let state = test_state();
  let app = init_app!(state);
  let owner = state.sessions.open("U1");
  let stranger = state.sessions.open("U2");
  let (_, posted) = call_json!(
    app,
    TestRequest::post()
      .uri("/api/v1/equipment")
      .insert_header(bearer(&owner))
      .set_json(equipment_form("Tractor A", "Tractor"))
  );
  let id = posted["equipment"]["id"].as_str().unwrap().to_string();
  let uri = format!("/api/v1/equipment/{}", id);

  let mut changed = equipment_form("Tractor A (serviced)", "Tractor");
  changed["price"] = json!("300");
  let (status, _) = call_json!(
    app,
    TestRequest::put().uri(&uri).insert_header(bearer(&stranger)).set_json(changed.clone())
  );
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, body) = call_json!(app, TestRequest::put().uri(&uri).insert_header(bearer(&owner)).set_json(changed));
  assert_eq!(status, StatusCode::OK, "{}", body);
  assert_eq!(body["alert"]["message"], "Equipment details updated successfully.");
  assert_eq!(body["next"]["action"], "back");

  let (_, details) = call_json!(app, TestRequest::get().uri(&uri));
  assert_eq!(details["equipment"]["name"], "Tractor A (serviced)");
  assert_eq!(details["equipment"]["price"], "300");
  assert_eq!(details["equipment"]["userId"], "U1");
}

#[actix_web::test]
async fn deleted_listing_is_gone_from_every_list() {
  let state = test_state();
  let app = init_app!(state);
  let owner = state.sessions.open("U1");
  let mut ids = Vec::new();
  for name in ["Tractor A", "Tractor B"] {
    let (_, posted) = call_json!(
      app,
      TestRequest::post()
        .uri("/api/v1/equipment")
        .insert_header(bearer(&owner))
        .set_json(equipment_form(name, "Tractor"))
    );
    ids.push(posted["equipment"]["id"].as_str().unwrap().to_string());
  }

  let stranger = state.sessions.open("U2");
  let (status, _) = call_json!(
    app,
    TestRequest::delete().uri(&format!("/api/v1/equipment/{}", ids[0])).insert_header(bearer(&stranger))
  );
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, body) = call_json!(
    app,
    TestRequest::delete().uri(&format!("/api/v1/equipment/{}", ids[0])).insert_header(bearer(&owner))
  );
  assert_eq!(status, StatusCode::OK, "{}", body);
  assert_eq!(body["deletedId"], ids[0].as_str());
  assert_eq!(names(&body["equipment"]), vec!["Tractor B"]);

  let (_, feed) = call_json!(app, TestRequest::get().uri("/api/v1/equipment"));
  let feed_ids: Vec<&str> = feed["equipment"].as_array().unwrap().iter().filter_map(|e| e["id"].as_str()).collect();
  assert!(!feed_ids.contains(&ids[0].as_str()));
  assert!(feed_ids.contains(&ids[1].as_str()));
}

#[actix_web::test]
async fn image_upload_is_served_back_from_files() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let png = [0x89u8, b'P', b'N', b'G', 1, 2, 3];
  let mut form = equipment_form("Sprayer B", "Sprayer");
  form["image"] = json!({ "fileName": "sprayer.png", "data": STANDARD.encode(png) });
  let (status, body) = call_json!(
    app,
    TestRequest::post().uri("/api/v1/equipment").insert_header(bearer(&token)).set_json(form)
  );
  assert_eq!(status, StatusCode::CREATED, "{}", body);

  let url = body["equipment"]["imageUrl"].as_str().unwrap().to_string();
  let path = url.split_once("/files/").map(|(_, p)| p.to_string()).unwrap();
  assert!(path.starts_with("equipment/"));
  assert!(path.ends_with(".png"));

  let resp = actix_web::test::call_service(&app, TestRequest::get().uri(&format!("/files/{}", path)).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers().get("content-type").unwrap(), "image/png");
  let bytes = actix_web::test::read_body(resp).await;
  assert_eq!(&bytes[..], &png[..]);
}

#[actix_web::test]
async fn invalid_image_data_rejects_the_post() {
  let state = test_state();
  let app = init_app!(state);
  let token = state.sessions.open("U1");

  let mut form = equipment_form("Sprayer B", "Sprayer");
  form["image"] = json!({ "data": "%%% not base64 %%%" });
  let (status, body) = call_json!(
    app,
    TestRequest::post().uri("/api/v1/equipment").insert_header(bearer(&token)).set_json(form)
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["fields"][0]["field"], "image");
  assert!(state.documents.fetch_all(EQUIPMENT).await.unwrap().is_empty());
}
