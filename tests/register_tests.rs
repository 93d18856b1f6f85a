mod common;

use common::{MemoryUsers, body_json, rest_event, status};
use serde_json::json;
use std::sync::atomic::Ordering;
use userdata::api::register::{
    DUPLICATE_EMAIL_MESSAGE, INTERNAL_ERROR_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
    USER_CREATED_MESSAGE, handle_registration,
};
use userdata::core::models::User;
use userdata::core::validation::{INVALID_EMAIL_MESSAGE, MISSING_FIELDS_MESSAGE};

fn post(body: &str) -> serde_json::Value {
    rest_event("POST", Some(body))
}

#[tokio::test]
async fn valid_registration_creates_record() {
    let users = MemoryUsers::default();
    let response =
        handle_registration(&users, &post(r#"{"name": "Ann", "email": "ann@example.com"}"#)).await;

    assert_eq!(status(&response), 201);
    assert_eq!(body_json(&response), json!({ "message": USER_CREATED_MESSAGE }));

    let stored = users.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Ann");
    assert_eq!(stored[0].email, "ann@example.com");
    assert!(!stored[0].id.is_empty());
}

#[tokio::test]
async fn generated_ids_are_unique() {
    let users = MemoryUsers::default();
    for email in ["a@b.c", "d@e.f", "g@h.i"] {
        let body = json!({ "name": "N", "email": email }).to_string();
        assert_eq!(status(&handle_registration(&users, &post(&body)).await), 201);
    }

    let mut ids: Vec<String> = users.snapshot().into_iter().map(|u| u.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn missing_fields_are_rejected_without_write() {
    let users = MemoryUsers::default();
    let bodies = [
        r#"{"email": "ann@example.com"}"#,
        r#"{"name": "Ann"}"#,
        r#"{"name": "", "email": "ann@example.com"}"#,
        r#"{"name": "Ann", "email": ""}"#,
        r#"{"name": null, "email": "ann@example.com"}"#,
        "{}",
    ];

    for body in bodies {
        let response = handle_registration(&users, &post(body)).await;
        assert_eq!(status(&response), 400, "body: {body}");
        assert_eq!(body_json(&response), json!({ "error": MISSING_FIELDS_MESSAGE }));
    }
    assert!(users.snapshot().is_empty());
}

#[tokio::test]
async fn malformed_body_is_treated_as_empty() {
    let users = MemoryUsers::default();

    let response = handle_registration(&users, &post("{name: Ann")).await;
    assert_eq!(status(&response), 400);

    let response = handle_registration(&users, &rest_event("POST", None)).await;
    assert_eq!(status(&response), 400);

    let response = handle_registration(&users, &post(r#"["Ann", "ann@example.com"]"#)).await;
    assert_eq!(status(&response), 400);

    assert!(users.snapshot().is_empty());
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let users = MemoryUsers::default();
    let response =
        handle_registration(&users, &post(r#"{"name": "Ann", "email": "not-an-email"}"#)).await;

    assert_eq!(status(&response), 400);
    assert_eq!(body_json(&response), json!({ "error": INVALID_EMAIL_MESSAGE }));
    assert!(users.snapshot().is_empty());
}

#[tokio::test]
async fn minimal_email_shape_is_accepted() {
    let users = MemoryUsers::default();
    let response = handle_registration(&users, &post(r#"{"name": "A", "email": "a@b.c"}"#)).await;
    assert_eq!(status(&response), 201);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let users = MemoryUsers::with(vec![User::new("Existing", "x@y.com")]);
    let response = handle_registration(&users, &post(r#"{"name": "New", "email": "x@y.com"}"#)).await;

    assert_eq!(status(&response), 409);
    assert_eq!(body_json(&response), json!({ "error": DUPLICATE_EMAIL_MESSAGE }));
    assert_eq!(users.snapshot().len(), 1);
}

#[tokio::test]
async fn duplicate_check_is_case_sensitive() {
    let users = MemoryUsers::with(vec![User::new("Existing", "x@y.com")]);
    let response = handle_registration(&users, &post(r#"{"name": "New", "email": "X@Y.com"}"#)).await;

    assert_eq!(status(&response), 201);
    assert_eq!(users.snapshot().len(), 2);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let users = MemoryUsers::default();
    let body = r#"{"name": "Ann", "email": "ann@example.com"}"#;

    for method in ["GET", "PUT", "DELETE", "PATCH", "post"] {
        let response = handle_registration(&users, &rest_event(method, Some(body))).await;
        assert_eq!(status(&response), 405, "method: {method}");
        assert_eq!(body_json(&response), json!({ "error": METHOD_NOT_ALLOWED_MESSAGE }));
    }

    let response = handle_registration(&users, &json!({ "body": body })).await;
    assert_eq!(status(&response), 405);
    assert!(users.snapshot().is_empty());
}

#[tokio::test]
async fn http_api_payload_is_routed_by_method() {
    let users = MemoryUsers::default();
    let event = json!({
        "requestContext": { "http": { "method": "POST" } },
        "body": r#"{"name": "Ann", "email": "ann@example.com"}"#,
        "isBase64Encoded": false
    });

    assert_eq!(status(&handle_registration(&users, &event).await), 201);
}

#[tokio::test]
async fn store_failure_is_generic_internal_error() {
    let users = MemoryUsers::default();
    users.fail.store(true, Ordering::SeqCst);

    let response =
        handle_registration(&users, &post(r#"{"name": "Ann", "email": "ann@example.com"}"#)).await;

    assert_eq!(status(&response), 500);
    let body = body_json(&response);
    assert_eq!(body, json!({ "error": INTERNAL_ERROR_MESSAGE }));
    assert!(!response["body"].as_str().unwrap().contains("ResourceNotFound"));
    assert!(users.snapshot().is_empty());
}

#[tokio::test]
async fn registration_responses_are_json_without_cors() {
    let users = MemoryUsers::default();
    let response =
        handle_registration(&users, &post(r#"{"name": "Ann", "email": "ann@example.com"}"#)).await;

    assert_eq!(response["headers"]["Content-Type"], "application/json");
    assert!(response["headers"].get("Access-Control-Allow-Origin").is_none());
}
