use axum::body::Body;
use axum::http::{Request, StatusCode};
use bmt_assign::config::Config;
use bmt_assign::server::build_router;
use http_body_util::BodyExt;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_reports_healthy() {
    let app = build_router(Config::default());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_endpoint_runs_sample_roster_through_the_pipeline() {
    let app = build_router(Config::default());
    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert!(json["assignments"].as_array().unwrap().len() > 0);
}

#[tokio::test]
async fn optimize_returns_validation_error_as_http_200() {
    let app = build_router(Config::default());
    let body = serde_json::json!({
        "nurses": [{"nurse_id": "N1", "name": "A", "skill_level": 3, "iv_cert": "Y", "max_patients": 4}],
        "patients": [
            {"patient_id": "P1", "initials": "A.B.", "base_acuity": 5, "chemo_type": "IV"},
            {"patient_id": "P2", "initials": "A.B.", "base_acuity": 5, "chemo_type": "IV"},
            {"patient_id": "P3", "initials": "A.B.", "base_acuity": 5, "chemo_type": "IV"}
        ]
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/optimize")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Validation failed");
    assert!(json["details"].as_array().unwrap().len() > 0);
}

#[tokio::test]
async fn optimize_returns_validation_error_for_missing_required_nurse_field() {
    let app = build_router(Config::default());
    // `nurse_id` is missing from the first nurse; the top-level
    // `nurses`/`patients` keys are both present, so this must deserialize
    // successfully and surface as a validation error, not a 400.
    let body = serde_json::json!({
        "nurses": [{"name": "A", "skill_level": 3, "iv_cert": "Y", "max_patients": 4}],
        "patients": [{"patient_id": "P1", "initials": "A.B.", "base_acuity": 5, "chemo_type": "none"}]
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/optimize")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Validation failed");
    let details = json["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d == "nurse[0]: nurse_id is required"));
}

#[tokio::test]
async fn optimize_returns_bad_request_on_malformed_json() {
    let app = build_router(Config::default());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/optimize")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn optimize_returns_bad_request_when_top_level_patients_key_is_missing() {
    let app = build_router(Config::default());
    let body = serde_json::json!({
        "nurses": [{"nurse_id": "N1", "name": "A", "skill_level": 3, "iv_cert": "Y"}]
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/optimize")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
