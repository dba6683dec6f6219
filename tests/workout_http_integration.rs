//! Integration tests for workout HTTP endpoints.
//!
//! Drives the assembled router end to end with the in-memory store and the
//! mock session validator.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use workout_planner::adapters::{
    app_router, InMemoryWorkoutRepository, MockSessionValidator, RouterOptions, WorkoutHandlers,
};
use workout_planner::domain::foundation::AuthError;
use workout_planner::domain::workout::QuotaLimits;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";

struct TestApp {
    router: Router,
    repository: InMemoryWorkoutRepository,
}

impl TestApp {
    fn new() -> Self {
        Self::with_validator(
            MockSessionValidator::new()
                .with_test_user(ALICE, "alice")
                .with_test_user(BOB, "bob"),
        )
    }

    fn with_validator(validator: MockSessionValidator) -> Self {
        let repository = InMemoryWorkoutRepository::new();
        let handlers = WorkoutHandlers::new(Arc::new(repository.clone()), QuotaLimits::default());
        let router = app_router(handlers, Arc::new(validator), &RouterOptions::default());
        Self { router, repository }
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(&self, token: &str, body: Value) -> Value {
        let (status, body) = self
            .send(Method::POST, "/api/workouts", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "body: {}", body);
        body["workout"].clone()
    }
}

fn exercise(title: &str, sets: u32) -> Value {
    json!({ "title": title, "reps": "8-12", "sets": sets, "rest": 90, "note": "controlled" })
}

fn workout_body(days: Vec<Value>) -> Value {
    json!({
        "title": "Strength",
        "startDate": "2024-01-01",
        "endDate": "2024-03-01T00:00:00Z",
        "days": days,
    })
}

fn day(title: &str, exercises: Vec<Value>) -> Value {
    json!({ "title": title, "exercises": exercises })
}

fn id(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health and authentication
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn workouts_require_authentication() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/workouts", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .send(Method::GET, "/api/workouts", Some("forged"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unavailable_identity_service_is_503() {
    let app = TestApp::with_validator(
        MockSessionValidator::new()
            .with_test_user(ALICE, "alice")
            .with_error(AuthError::service_unavailable("down")),
    );

    let (status, _) = app
        .send(Method::GET, "/api/workouts", Some(ALICE), None)
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Workouts
// =============================================================================

#[tokio::test]
async fn create_then_list_returns_fresh_rotation_state() {
    let app = TestApp::new();
    let created = app
        .create(ALICE, workout_body(vec![day("Push", vec![exercise("Bench", 3)])]))
        .await;

    assert_eq!(created["title"], "Strength");
    assert_eq!(created["ownerId"], "alice");
    assert_eq!(created["days"][0]["exerciseIndex"], -1);
    assert_eq!(created["days"][0]["workoutCount"], 0);
    assert_eq!(created["days"][0]["exercises"][0]["weights"], json!([]));

    let (status, body) = app
        .send(Method::GET, "/api/workouts", Some(ALICE), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Fetched workouts");
    assert_eq!(body["workouts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_only_shows_own_workouts() {
    let app = TestApp::new();
    app.create(ALICE, workout_body(vec![])).await;

    let (_, body) = app.send(Method::GET, "/api/workouts", Some(BOB), None).await;

    assert_eq!(body["workouts"], json!([]));
}

#[tokio::test]
async fn invalid_payload_reports_every_field() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/workouts",
            Some(ALICE),
            Some(json!({ "title": "   ", "startDate": "soon", "endDate": "2024-03-01" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "startDate"]);
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/workouts")
        .header(header::AUTHORIZATION, format!("Bearer {}", ALICE))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn eleventh_workout_hits_quota() {
    let app = TestApp::new();
    for _ in 0..QuotaLimits::DEFAULT_MAX_WORKOUTS {
        app.create(ALICE, workout_body(vec![])).await;
    }

    let (status, body) = app
        .send(Method::POST, "/api/workouts", Some(ALICE), Some(workout_body(vec![])))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "QUOTA_EXCEEDED");
}

#[tokio::test]
async fn stranger_gets_forbidden_and_owner_can_delete() {
    let app = TestApp::new();
    let workout = app.create(ALICE, workout_body(vec![])).await;
    let uri = format!("/api/workouts/{}", id(&workout));

    let (status, _) = app.send(Method::GET, &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::DELETE, &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Workout deleted");

    let (status, body) = app.send(Method::GET, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "WORKOUT_NOT_FOUND");
}

#[tokio::test]
async fn malformed_workout_id_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::GET, "/api/workouts/not-a-uuid", Some(ALICE), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

// =============================================================================
// Days and rotation
// =============================================================================

#[tokio::test]
async fn add_day_accepts_wrapped_body() {
    let app = TestApp::new();
    let workout = app.create(ALICE, workout_body(vec![])).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/workouts/{}/days", id(&workout)),
            Some(ALICE),
            Some(json!({ "day": day("Legs", vec![exercise("Squat", 5)]) })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workout"]["days"][0]["title"], "Legs");
    assert_eq!(body["workout"]["version"], 2);
}

#[tokio::test]
async fn eleventh_day_is_rejected_and_workout_unchanged() {
    let app = TestApp::new();
    let days = (0..10).map(|i| day(&format!("Day {}", i), vec![])).collect();
    let workout = app.create(ALICE, workout_body(days)).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/workouts/{}/days", id(&workout)),
            Some(ALICE),
            Some(day("Extra", vec![])),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "You cannot add more than 10 days");

    let (_, body) = app
        .send(Method::GET, &format!("/api/workouts/{}", id(&workout)), Some(ALICE), None)
        .await;
    assert_eq!(body["workout"], workout);
}

#[tokio::test]
async fn advance_walks_the_day_and_wraps() {
    let app = TestApp::new();
    let workout = app
        .create(
            ALICE,
            workout_body(vec![day("Push", vec![exercise("Bench", 3), exercise("Dips", 3)])]),
        )
        .await;
    let uri = format!(
        "/api/workouts/{}/days/{}/advance",
        id(&workout),
        id(&workout["days"][0])
    );

    let mut seen = Vec::new();
    for _ in 0..3 {
        let (status, body) = app.send(Method::POST, &uri, Some(ALICE), None).await;
        assert_eq!(status, StatusCode::OK);
        let day = &body["workout"]["days"][0];
        seen.push((day["exerciseIndex"].clone(), day["workoutCount"].clone()));
    }

    assert_eq!(
        seen,
        vec![
            (json!(0), json!(0)),
            (json!(1), json!(0)),
            (json!(-1), json!(1)),
        ]
    );
}

#[tokio::test]
async fn update_day_merges_and_keeps_history() {
    let app = TestApp::new();
    let workout = app
        .create(ALICE, workout_body(vec![day("Push", vec![exercise("Bench", 2)])]))
        .await;
    let day_json = &workout["days"][0];
    let bench = id(&day_json["exercises"][0]);

    let (status, _) = app
        .send(
            Method::POST,
            &format!(
                "/api/workouts/{}/days/{}/exercises/{}/sessions",
                id(&workout),
                id(day_json),
                bench
            ),
            Some(ALICE),
            Some(json!({ "weights": [60, "62.5"], "record": "felt strong" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let mut edited = exercise("Incline Bench", 2);
    edited["_id"] = json!(bench);
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/workouts/{}/days/{}", id(&workout), id(day_json)),
            Some(ALICE),
            Some(json!({ "title": "Push A", "exercises": [edited, exercise("Flyes", 3)] })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let day = &body["workout"]["days"][0];
    assert_eq!(day["title"], "Push A");
    assert_eq!(day["exercises"][0]["id"], json!(bench));
    assert_eq!(day["exercises"][0]["title"], "Incline Bench");
    assert_eq!(day["exercises"][0]["weights"], json!([[60.0, 62.5]]));
    assert_eq!(day["exercises"][0]["record"], json!(["felt strong"]));
    assert_eq!(day["exercises"][1]["title"], "Flyes");
    assert_eq!(day["exercises"][1]["weights"], json!([]));
}

#[tokio::test]
async fn log_session_with_wrong_arity_is_rejected() {
    let app = TestApp::new();
    let workout = app
        .create(ALICE, workout_body(vec![day("Push", vec![exercise("Bench", 3)])]))
        .await;
    let day_json = &workout["days"][0];

    let (status, body) = app
        .send(
            Method::POST,
            &format!(
                "/api/workouts/{}/days/{}/exercises/{}/sessions",
                id(&workout),
                id(day_json),
                id(&day_json["exercises"][0])
            ),
            Some(ALICE),
            Some(json!({ "weights": [60], "record": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn deleting_exercise_before_pointer_shifts_it() {
    let app = TestApp::new();
    let workout = app
        .create(
            ALICE,
            workout_body(vec![day(
                "Pull",
                vec![exercise("Row", 3), exercise("Curl", 3), exercise("Shrug", 3)],
            )]),
        )
        .await;
    let day_json = &workout["days"][0];
    let advance = format!(
        "/api/workouts/{}/days/{}/advance",
        id(&workout),
        id(day_json)
    );
    for _ in 0..2 {
        app.send(Method::POST, &advance, Some(ALICE), None).await;
    }

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!(
                "/api/workouts/{}/days/{}/exercises/{}",
                id(&workout),
                id(day_json),
                id(&day_json["exercises"][0])
            ),
            Some(ALICE),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let day = &body["workout"]["days"][0];
    assert_eq!(day["exercises"].as_array().unwrap().len(), 2);
    assert_eq!(day["exerciseIndex"], 0);
    assert_eq!(day["exercises"][0]["title"], "Curl");
}

#[tokio::test]
async fn delete_day_then_missing_day_is_not_found() {
    let app = TestApp::new();
    let workout = app
        .create(ALICE, workout_body(vec![day("A", vec![]), day("B", vec![])]))
        .await;
    let uri = format!(
        "/api/workouts/{}/days/{}",
        id(&workout),
        id(&workout["days"][0])
    );

    let (status, body) = app.send(Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workout"]["days"][0]["title"], "B");

    let (status, body) = app.send(Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "DAY_NOT_FOUND");
}
