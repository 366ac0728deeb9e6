//! Tests for the address handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::AddressServiceImpl;
use crate::domain::ports::{AddressRepositoryError, MockAddressService};
use crate::middleware::{ErrorMapping, Trace};
use crate::outbound::memory::InMemoryAddressRepository;
use crate::settings::RuntimeMode;

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

fn in_memory_state() -> HttpState {
    let service = AddressServiceImpl::new(
        Arc::new(InMemoryAddressRepository::new()),
        Arc::new(DefaultClock),
    );
    HttpState::new(Arc::new(service))
}

async fn send(state: HttpState, req: test::TestRequest) -> Reply {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(ErrorMapping::new(RuntimeMode::Production))
            .wrap(Trace)
            .service(web::scope("/api").configure(configure)),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(res).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        location,
        body,
    }
}

#[fixture]
fn troy() -> Value {
    json!({
        "street": "1 Main St",
        "city": "Troy",
        "state": "NY",
        "zipCode": "12180",
        "country": "USA"
    })
}

fn payload(id: Uuid) -> AddressPayload {
    AddressPayload {
        id,
        street: "1 Main St".to_owned(),
        city: "Troy".to_owned(),
        state: "NY".to_owned(),
        zip_code: "12180".to_owned(),
        country: "USA".to_owned(),
    }
}

#[rstest]
#[actix_web::test]
async fn create_returns_location_and_echoes_fields(troy: Value) {
    let reply = send(
        in_memory_state(),
        test::TestRequest::post().uri("/api/addresses").set_json(&troy),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    let id = reply.body["id"].as_str().expect("id present").to_owned();
    assert!(Uuid::parse_str(&id).is_ok());
    assert_eq!(reply.location, Some(format!("/api/addresses/{id}")));
    for field in ["street", "city", "state", "zipCode", "country"] {
        assert_eq!(reply.body[field], troy[field], "{field} differs");
    }
}

#[rstest]
#[actix_web::test]
async fn created_address_can_be_fetched_and_listed(troy: Value) {
    let state = in_memory_state();
    let created = send(
        state.clone(),
        test::TestRequest::post().uri("/api/addresses").set_json(&troy),
    )
    .await;
    let location = created.location.expect("location header");

    let fetched = send(state.clone(), test::TestRequest::get().uri(&location)).await;
    let listed = send(state, test::TestRequest::get().uri("/api/addresses")).await;

    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([created.body]));
}

#[actix_web::test]
async fn empty_store_lists_nothing() {
    let reply = send(in_memory_state(), test::TestRequest::get().uri("/api/addresses")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!([]));
}

#[rstest]
#[case("street", "", "Street is required.")]
#[case("zipCode", "1234", "ZipCode must be in valid US format (12345 or 12345-6789).")]
#[case("country", "", "Country is required.")]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    mut troy: Value,
    #[case] field: &str,
    #[case] value: &str,
    #[case] message: &str,
) {
    troy[field] = json!(value);
    let mut service = MockAddressService::new();
    service.expect_create().never();

    let reply = send(
        HttpState::new(Arc::new(service)),
        test::TestRequest::post().uri("/api/addresses").set_json(&troy),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["detail"], "One or more validation errors occurred.");
    assert_eq!(reply.body["instance"], "/api/addresses");
    let messages = reply.body["errors"][field]
        .as_array()
        .expect("field has messages");
    assert!(messages.contains(&json!(message)), "{messages:?}");
}

#[actix_web::test]
async fn missing_fields_are_reported_not_rejected_by_the_decoder() {
    let reply = send(
        in_memory_state(),
        test::TestRequest::post()
            .uri("/api/addresses")
            .set_json(json!({ "street": "1 Main St" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["errors"].get("street").is_none());
    assert_eq!(reply.body["errors"]["city"][0], "City is required.");
}

#[rstest]
#[case("street", "Street is required.")]
#[case("city", "City is required.")]
#[case("country", "Country is required.")]
#[actix_web::test]
async fn null_fields_are_reported_as_required(
    mut troy: Value,
    #[case] field: &str,
    #[case] message: &str,
) {
    troy[field] = Value::Null;
    let mut service = MockAddressService::new();
    service.expect_create().never();

    let reply = send(
        HttpState::new(Arc::new(service)),
        test::TestRequest::post().uri("/api/addresses").set_json(&troy),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errors"][field], json!([message]));
}

#[rstest]
#[case::null(Value::Null, json!(["ZipCode is required."]))]
#[case::empty(
    json!(""),
    json!([
        "ZipCode is required.",
        "ZipCode must be in valid US format (12345 or 12345-6789)."
    ])
)]
#[actix_web::test]
async fn absent_zip_skips_the_format_rule(
    mut troy: Value,
    #[case] zip: Value,
    #[case] expected: Value,
) {
    troy["zipCode"] = zip;

    let reply = send(
        in_memory_state(),
        test::TestRequest::put()
            .uri(&format!("/api/addresses/{}", Uuid::new_v4()))
            .set_json(&troy),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errors"]["zipCode"], expected);
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let reply = send(
        in_memory_state(),
        test::TestRequest::post()
            .uri("/api/addresses")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"street\":"),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["title"], "Bad Request");
}

#[rstest]
#[case::get(test::TestRequest::get())]
#[case::delete(test::TestRequest::delete())]
#[actix_web::test]
async fn unknown_ids_are_not_found(#[case] req: test::TestRequest) {
    let id = Uuid::new_v4();

    let reply = send(in_memory_state(), req.uri(&format!("/api/addresses/{id}"))).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["detail"], format!("Address with ID {id} not found."));
}

#[rstest]
#[actix_web::test]
async fn updating_unknown_id_is_not_found(troy: Value) {
    let id = Uuid::new_v4();

    let reply = send(
        in_memory_state(),
        test::TestRequest::put()
            .uri(&format!("/api/addresses/{id}"))
            .set_json(&troy),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn non_uuid_ids_do_not_match() {
    let reply = send(
        in_memory_state(),
        test::TestRequest::get().uri("/api/addresses/not-a-uuid"),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_replaces_fields(troy: Value) {
    let state = in_memory_state();
    let created = send(
        state.clone(),
        test::TestRequest::post().uri("/api/addresses").set_json(&troy),
    )
    .await;
    let location = created.location.expect("location header");
    let mut revised = troy;
    revised["city"] = json!("Albany");
    revised["zipCode"] = json!("12207-1234");

    let updated = send(
        state.clone(),
        test::TestRequest::put().uri(&location).set_json(&revised),
    )
    .await;
    let fetched = send(state, test::TestRequest::get().uri(&location)).await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], created.body["id"]);
    assert_eq!(updated.body["city"], "Albany");
    assert_eq!(fetched.body, updated.body);
}

#[rstest]
#[actix_web::test]
async fn delete_succeeds_once(troy: Value) {
    let state = in_memory_state();
    let created = send(
        state.clone(),
        test::TestRequest::post().uri("/api/addresses").set_json(&troy),
    )
    .await;
    let location = created.location.expect("location header");

    let first = send(state.clone(), test::TestRequest::delete().uri(&location)).await;
    let second = send(state, test::TestRequest::delete().uri(&location)).await;

    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(first.body, Value::Null);
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn vanished_rows_surface_with_the_operation_status(troy: Value) {
    let id = Uuid::new_v4();
    let mut service = MockAddressService::new();
    service
        .expect_update()
        .times(1)
        .return_once(|_| Err(AddressServiceError::UpdateFailed));

    let reply = send(
        HttpState::new(Arc::new(service)),
        test::TestRequest::put()
            .uri(&format!("/api/addresses/{id}"))
            .set_json(&troy),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["detail"], "Failed to update address.");
}

#[actix_web::test]
async fn storage_faults_are_redacted() {
    let mut service = MockAddressService::new();
    service
        .expect_list()
        .times(1)
        .return_once(|| Err(AddressRepositoryError::connection("pool exhausted").into()));

    let reply = send(
        HttpState::new(Arc::new(service)),
        test::TestRequest::get().uri("/api/addresses"),
    )
    .await;

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        reply.body["detail"],
        "An error occurred while processing your request."
    );
    assert!(reply.body.get("stackTrace").is_none());
}

#[actix_web::test]
async fn fetch_passes_path_id_to_service() {
    let id = Uuid::new_v4();
    let mut service = MockAddressService::new();
    service
        .expect_get_by_id()
        .withf(move |requested| Uuid::from(*requested) == id)
        .times(1)
        .return_once(move |_| Ok(payload(id)));

    let reply = send(
        HttpState::new(Arc::new(service)),
        test::TestRequest::get().uri(&format!("/api/addresses/{id}")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["id"], id.to_string());
    assert_eq!(reply.body["zipCode"], "12180");
}

#[rstest]
#[::core::prelude::v1::test]
fn location_points_at_the_resource() {
    assert_eq!(
        address_location(Uuid::nil()),
        "/api/addresses/00000000-0000-0000-0000-000000000000"
    );
}
