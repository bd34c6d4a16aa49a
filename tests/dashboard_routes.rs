/// Router-level tests: HTML page and JSON API against a mocked scoring API
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use mes_dashboard::config::{Config, ScoringConfig};
use mes_dashboard::enrichment::{FalsityTable, MissingScoreOrder};
use mes_dashboard::handlers::{router, AppState};
use mes_dashboard::reference_data::{DensitySamples, ReferenceData};
use mes_dashboard::scoring_client::ScoringClient;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_state(base_url: String) -> Arc<AppState> {
    let scoring = ScoringConfig {
        base_url,
        host: "mescalc.p.rapidapi.com".to_string(),
        key: "test_key".to_string(),
        normalize_case: false,
    };
    let config = Config {
        port: 0,
        scoring: scoring.clone(),
        falsity_csv: String::new(),
        density_csv: String::new(),
        missing_scores: MissingScoreOrder::Last,
    };
    let reference = ReferenceData {
        falsity: FalsityTable::from_pairs(vec![("infowars", 0.91), ("nytimes", 0.08)]),
        density: DensitySamples(vec![0.2, 0.5, 0.8]),
    };

    Arc::new(AppState {
        config,
        client: ScoringClient::new(scoring).unwrap(),
        reference: Arc::new(reference),
    })
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn mount_account(server: &MockServer, handle: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/account/{}", handle)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(create_test_state("http://127.0.0.1:9".to_string()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));
}

#[tokio::test]
async fn test_empty_page() {
    let (status, body) = get(create_test_state("http://127.0.0.1:9".to_string()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("How much misinformation are you exposed to?"));
    assert!(!body.contains("You entered"));
}

#[tokio::test]
async fn test_json_view_for_found_account() {
    let mock_server = MockServer::start().await;
    mount_account(
        &mock_server,
        "alice",
        serde_json::json!({
            "twitter_screen_name": "Alice",
            "twitter_user_id": "1234",
            "misinfo_exposure_score": 0.51,
            "misinfo_exposure_score_weighted_numtweets": 0.4,
            "partisan_score": -0.352,
            "num_following": 3,
            "following": ["nytimes", "nobody", "infowars"]
        }),
    )
    .await;

    let (status, body) = get(create_test_state(mock_server.uri()), "/api/v1/accounts/@alice").await;
    assert_eq!(status, StatusCode::OK);

    let view: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["screen_name"], "Alice");
    assert_eq!(view["deltas"]["misinfo"], 0.0);
    assert_eq!(view["deltas"]["partisan"], 0.0);
    assert_eq!(view["exposure"]["delta_label"], "0.00% higher than average");
    assert_eq!(view["following"]["rows"][0]["handle"], "infowars");
    assert_eq!(view["following"]["rows"][0]["ordinal"], 1);
    assert_eq!(view["following"]["rows"][2]["handle"], "nobody");
    assert!(view["following"]["rows"][2]["falsity_score"].is_null());
}

#[tokio::test]
async fn test_json_not_found() {
    let mock_server = MockServer::start().await;
    mount_account(
        &mock_server,
        "ghost",
        serde_json::json!({"message": "Cannot find information for this user"}),
    )
    .await;

    let (status, body) = get(create_test_state(mock_server.uri()), "/api/v1/accounts/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Cannot find user"));
}

#[tokio::test]
async fn test_page_not_found_renders_warning_only() {
    let mock_server = MockServer::start().await;
    mount_account(
        &mock_server,
        "ghost",
        serde_json::json!({"message": "Cannot find information for this user"}),
    )
    .await;

    let (status, body) = get(create_test_state(mock_server.uri()), "/?handle=%40ghost").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cannot find user. Please check your username or ID."));
    assert!(!body.contains("You entered"));
    assert!(!body.contains("Exposure"));
}

#[tokio::test]
async fn test_page_missing_partisanship() {
    let mock_server = MockServer::start().await;
    mount_account(
        &mock_server,
        "alice",
        serde_json::json!({
            "twitter_screen_name": "alice",
            "twitter_user_id": "1",
            "misinfo_exposure_score": 0.3,
            "misinfo_exposure_score_weighted_numtweets": 0.2,
            "partisan_score": null,
            "num_following": 1,
            "following": ["infowars"]
        }),
    )
    .await;

    let (status, body) = get(create_test_state(mock_server.uri()), "/?handle=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("You entered <strong>alice</strong> (ID: 1)."));
    assert!(body.contains("lower than average"));
    assert!(body.contains("No partisanship score available."));
    assert!(body.contains("exposure-chart"));
    assert!(!body.contains("partisanship-chart"));
}

#[tokio::test]
async fn test_page_upstream_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let (status, body) = get(create_test_state(mock_server.uri()), "/?handle=alice").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Could not retrieve scores right now."));
    assert!(!body.contains("boom"));
}

#[tokio::test]
async fn test_json_invalid_handle() {
    let (status, _) = get(
        create_test_state("http://127.0.0.1:9".to_string()),
        "/api/v1/accounts/a%20b",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = get(
        create_test_state("http://127.0.0.1:9".to_string()),
        "/api-docs/openapi.json",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/api/v1/accounts/{handle}"));
}

#[tokio::test]
async fn test_json_upstream_failure_keeps_status_behind_context() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down at 10.0.0.3"))
        .mount(&mock_server)
        .await;

    let (status, body) = get(create_test_state(mock_server.uri()), "/api/v1/accounts/alice").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let error: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        error["error"],
        "Could not retrieve scores right now. Please try again later."
    );
    assert!(!body.contains("10.0.0.3"));
}

#[tokio::test]
async fn test_page_has_loading_indicator() {
    let (status, body) = get(create_test_state("http://127.0.0.1:9".to_string()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Retrieving data..."));
    assert!(body.contains(r#"id="loading""#));
}
