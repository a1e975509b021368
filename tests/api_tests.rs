mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use actix_web_httpauth::middleware::HttpAuthentication;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use common::MemoryActivityStore;
use dayledger::handlers;
use dayledger::ledger::Ledger;
use dayledger::utils::jwt;

fn bearer_token(owner: Uuid) -> String {
    std::env::set_var("JWT_SECRET", "test-secret");
    jwt::generate_token(&owner.to_string()).expect("token")
}

macro_rules! test_app {
    () => {{
        let ledger = Ledger::new(Arc::new(MemoryActivityStore::default()));
        let auth = HttpAuthentication::bearer(jwt::validator);
        test::init_service(
            App::new()
                .app_data(web::Data::new(ledger))
                .service(
                    web::resource("/v1/activities")
                        .wrap(auth.clone())
                        .route(web::get().to(handlers::activity::list_activities))
                        .route(web::post().to(handlers::activity::create_activity)),
                )
                .service(
                    web::resource("/v1/activities/{activityId}")
                        .wrap(auth.clone())
                        .route(web::patch().to(handlers::activity::update_activity))
                        .route(web::delete().to(handlers::activity::delete_activity)),
                )
                .service(
                    web::resource("/v1/analytics/{date}")
                        .wrap(auth.clone())
                        .route(web::get().to(handlers::analytics::day_summary)),
                ),
        )
        .await
    }};
}

#[actix_web::test]
async fn requests_without_token_are_unauthorized() {
    let app = test_app!();

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/v1/activities?date=2024-03-01")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_then_list_round_trip() {
    let app = test_app!();
    let owner = Uuid::new_v4();
    let token = bearer_token(owner);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/activities")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "date": "2024-03-01",
                "name": "Deep work",
                "category": "Work",
                "minutes": 90
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(response).await;
    assert_eq!(created["name"], "Deep work");
    assert_eq!(created["category"], "Work");
    assert_eq!(created["minutes"], 90);
    assert!(created["id"].is_string());

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/v1/activities?date=2024-03-01")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(response).await;
    assert_eq!(listed.as_array().map(|a| a.len()), Some(1));
    assert_eq!(listed[0]["id"], created["id"]);
}

#[actix_web::test]
async fn budget_exceeded_body_carries_total_and_excess() {
    let app = test_app!();
    let token = bearer_token(Uuid::new_v4());

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/activities")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "date": "2024-03-01",
                "name": "Sleep",
                "category": "Sleep",
                "minutes": 480
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/activities")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "date": "2024-03-01",
                "name": "Marathon meeting",
                "category": "Work",
                "minutes": 1000
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["current_total"], 480);
    assert_eq!(body["excess"], 40);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Current total: 480 minutes"));
}

#[actix_web::test]
async fn validation_failure_lists_fields() {
    let app = test_app!();
    let token = bearer_token(Uuid::new_v4());

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/activities")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "date": "2024-03-01",
                "name": "",
                "category": "Chores",
                "minutes": 90
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "category"]);
}

#[actix_web::test]
async fn malformed_list_date_is_bad_request() {
    let app = test_app!();
    let token = bearer_token(Uuid::new_v4());

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/v1/activities?date=2024-3-01")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/v1/activities")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_activity_is_not_found_for_update_and_delete() {
    let app = test_app!();
    let token = bearer_token(Uuid::new_v4());
    let ghost = Uuid::new_v4();

    let response = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/v1/activities/{}", ghost))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "minutes": 30 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/v1/activities/{}", ghost))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn foreign_activity_reads_as_not_found() {
    let app = test_app!();
    let owner_a = bearer_token(Uuid::new_v4());
    let owner_b = bearer_token(Uuid::new_v4());

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/activities")
            .insert_header(("Authorization", format!("Bearer {}", owner_a)))
            .set_json(json!({
                "date": "2024-03-01",
                "name": "Secret project",
                "category": "Work",
                "minutes": 120
            }))
            .to_request(),
    )
    .await;
    let created: Value = test::read_body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Same id, different owner: indistinguishable from a missing record.
    let response = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/v1/activities/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", owner_b)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn analytics_summary_reports_breakdown() {
    let app = test_app!();
    let token = bearer_token(Uuid::new_v4());

    for (name, category, minutes) in [
        ("Standup", "Work", 60),
        ("Review", "Work", 30),
        ("Sleep", "Sleep", 480),
    ] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/activities")
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .set_json(json!({
                    "date": "2024-03-01",
                    "name": name,
                    "category": category,
                    "minutes": minutes
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/v1/analytics/2024-03-01")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["total_minutes"], 570);
    assert_eq!(body["remaining_minutes"], 870);
    assert_eq!(body["categories"][0]["category"], "Sleep");
    assert_eq!(body["categories"][0]["minutes"], 480);
    assert_eq!(body["categories"][1]["category"], "Work");
    assert_eq!(body["categories"][1]["minutes"], 90);
}
