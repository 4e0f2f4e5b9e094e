//! Practitioner CRUD integration tests.
//!
//! Tests verify:
//! - Create then fetch returns every submitted field
//! - List returns records in insertion order
//! - Update overwrites all nine fields
//! - Delete of a missing id is 404 every time
//! - Invalid ids and bodies are rejected with 400

use axum::http::Method;

use practitioner_api::create_router;
use practitioner_api::store::{Store, Value};

use super::test_utils::{
    practitioner_body, request, send, seeded_store, test_config, test_router, token_for,
};

async fn create(router: &axum::Router, token: &str, first_name: &str) -> i64 {
    let (status, body) = send(
        router,
        request(
            Method::POST,
            "/practitioners",
            Some(token),
            Some(practitioner_body(first_name)),
        ),
    )
    .await;
    assert_eq!(status, 201, "create failed: {body}");
    assert_eq!(body["message"], "Practitioner created");
    body["id"].as_i64().unwrap()
}

// =============================================================================
// Create and Read
// =============================================================================

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let router = test_router().await;
    let token = token_for(1);

    let id = create(&router, &token, "Ada").await;

    let (status, body) = send(
        &router,
        request(Method::GET, &format!("/practitioners/{}", id), Some(&token), None),
    )
    .await;
    assert_eq!(status, 200);

    let mut expected = practitioner_body("Ada");
    expected["id"] = serde_json::json!(id);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_list_practitioners() {
    let router = test_router().await;
    let token = token_for(1);

    create(&router, &token, "Ada").await;
    create(&router, &token, "Bo").await;
    create(&router, &token, "Cy").await;

    let (status, body) = send(
        &router,
        request(Method::GET, "/practitioners", Some(&token), None),
    )
    .await;
    assert_eq!(status, 200);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Bo", "Cy"]);
}

#[tokio::test]
async fn test_list_with_null_columns() {
    let store = seeded_store().await;
    let router = create_router(store.clone(), test_config());
    let token = token_for(1);

    let full = create(&router, &token, "Ada").await;
    store
        .execute(
            "INSERT INTO practitioners (first_name, last_name, birth_date, weight, height, rank_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
            vec![
                Value::from("Bo"),
                Value::from("Lenoir"),
                Value::from("1991-03-08"),
                Value::Real(64.0),
                Value::Real(1.7),
                Value::Integer(2),
            ],
        )
        .await
        .unwrap();

    let (status, body) = send(
        &router,
        request(Method::GET, "/practitioners", Some(&token), None),
    )
    .await;
    assert_eq!(status, 200, "list failed: {body}");

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], full);
    assert_eq!(records[0]["city_of_birth"], "Nantes");
    assert_eq!(records[1]["first_name"], "Bo");
    assert!(records[1]["city_of_birth"].is_null());
    assert!(records[1]["age"].is_null());
    assert!(records[1]["grade_id"].is_null());

    let (status, single) = send(
        &router,
        request(
            Method::GET,
            &format!("/practitioners/{}", records[1]["id"]),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, 200);
    assert!(single["city_of_birth"].is_null());
}

#[tokio::test]
async fn test_create_with_missing_field_rejected() {
    let router = test_router().await;

    let mut body = practitioner_body("Ada");
    body.as_object_mut().unwrap().remove("grade_id");

    let (status, response) = send(
        &router,
        request(Method::POST, "/practitioners", Some(&token_for(1)), Some(body)),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(response["error"], "invalid_body");
}

#[tokio::test]
async fn test_create_with_wrong_type_rejected() {
    let router = test_router().await;

    let mut body = practitioner_body("Ada");
    body["age"] = serde_json::json!("thirty");

    let (status, _) = send(
        &router,
        request(Method::POST, "/practitioners", Some(&token_for(1)), Some(body)),
    )
    .await;

    assert_eq!(status, 400);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let router = test_router().await;
    let token = token_for(1);
    let id = create(&router, &token, "Ada").await;

    let replacement = serde_json::json!({
        "first_name": "Beatrice",
        "last_name": "Lenoir",
        "birth_date": "1979-12-24",
        "city_of_birth": "Rouen",
        "age": 45,
        "weight": 58.0,
        "height": 1.62,
        "rank_id": 9,
        "grade_id": 11
    });

    let (status, body) = send(
        &router,
        request(
            Method::PUT,
            &format!("/practitioners/{}", id),
            Some(&token),
            Some(replacement.clone()),
        ),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["affected_rows"], 1);

    let (_, stored) = send(
        &router,
        request(Method::GET, &format!("/practitioners/{}", id), Some(&token), None),
    )
    .await;

    for (field, value) in replacement.as_object().unwrap() {
        assert_eq!(&stored[field], value, "field {field} was not overwritten");
    }
}

#[tokio::test]
async fn test_update_missing_practitioner() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        request(
            Method::PUT,
            "/practitioners/999",
            Some(&token_for(1)),
            Some(practitioner_body("Ada")),
        ),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_partial_update_rejected_and_record_untouched() {
    let router = test_router().await;
    let token = token_for(1);
    let id = create(&router, &token, "Ada").await;

    let (status, _) = send(
        &router,
        request(
            Method::PUT,
            &format!("/practitioners/{}", id),
            Some(&token),
            Some(serde_json::json!({ "first_name": "Zed" })),
        ),
    )
    .await;
    assert_eq!(status, 400);

    let (_, stored) = send(
        &router,
        request(Method::GET, &format!("/practitioners/{}", id), Some(&token), None),
    )
    .await;
    assert_eq!(stored["first_name"], "Ada");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_practitioner() {
    let router = test_router().await;
    let token = token_for(1);
    let id = create(&router, &token, "Ada").await;

    let uri = format!("/practitioners/{}", id);

    let (status, body) = send(&router, request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Practitioner deleted successfully");

    let (status, _) = send(&router, request(Method::GET, &uri, Some(&token), None)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_delete_missing_is_not_found_every_time() {
    let router = test_router().await;
    let token = token_for(1);
    let survivor = create(&router, &token, "Ada").await;

    for _ in 0..2 {
        let (status, body) = send(
            &router,
            request(Method::DELETE, "/practitioners/424242", Some(&token), None),
        )
        .await;
        assert_eq!(status, 404);
        assert_eq!(body["error"], "not_found");
    }

    let (status, _) = send(
        &router,
        request(
            Method::GET,
            &format!("/practitioners/{}", survivor),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, 200);
}

// =============================================================================
// Path Validation
// =============================================================================

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let router = test_router().await;
    let token = token_for(1);

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(
            &router,
            request(method, "/practitioners/abc", Some(&token), None),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "invalid_id");
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let router = test_router().await;

    let (status, _) = send(&router, request(Method::GET, "/nowhere", None, None)).await;
    assert_eq!(status, 404);
}
