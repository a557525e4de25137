use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use review_cell::review_routes;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

async fn send(request: Request<Body>, store: &MockServer) -> (StatusCode, Value) {
    let router = review_routes(TestConfig::with_store(&store.uri()).to_arc());
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_review(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_reviews() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::review_row("Sunita", 5, "Excellent care", "2024-01-12")
        ])))
        .mount(&mock_server)
        .await;

    let (status, body) = send(Request::builder().uri("/").body(Body::empty()).unwrap(), &mock_server).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reviews"][0]["name"], "Sunita");
    assert!(body.get("notice").is_none());
}

#[tokio::test]
async fn test_list_reviews_degraded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&mock_server)
        .await;

    let (status, body) = send(Request::builder().uri("/").body(Body::empty()).unwrap(), &mock_server).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reviews"], json!([]));
    assert_eq!(body["notice"], "Failed to fetch reviews: service unavailable");
}

#[tokio::test]
async fn test_create_review_with_prompt() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/reviews"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::review_row("Sunita", 5, "Excellent care", "2024-01-12")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = send(
        post_review(json!({"name": "Sunita", "rating": 5, "comment": "Excellent care"})),
        &mock_server,
    ).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["review"]["rating"], 5);
    assert_eq!(body["external_prompt"]["text"], "Excellent care");
}

#[tokio::test]
async fn test_create_review_missing_fields() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = send(post_review(json!({"name": "", "rating": 4, "comment": "ok"})), &mock_server).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please fill in all fields");
}

#[tokio::test]
async fn test_create_review_out_of_range_rating_is_json_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    for rating in [json!(300), json!(-1), json!(4.5), json!(0)] {
        let (status, body) = send(
            post_review(json!({"name": "Sunita", "rating": rating, "comment": "Excellent care"})),
            &mock_server,
        ).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {}", rating);
        assert!(body["error"].as_str().unwrap().starts_with("Rating must be between 1 and 5"));
    }
}

#[tokio::test]
async fn test_create_review_wrong_rating_type_is_json_error() {
    let mock_server = MockServer::start().await;

    let (status, body) = send(
        post_review(json!({"name": "Sunita", "rating": "five", "comment": "Excellent care"})),
        &mock_server,
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_reviews_with_integer_ids() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 12, "name": "Sunita", "rating": 5, "comment": "Excellent care", "date": "2024-01-12"},
            {"id": 7, "name": "Ravi", "rating": 4, "comment": "Helpful", "date": "2023-11-02"}
        ])))
        .mount(&mock_server)
        .await;

    let (status, body) = send(Request::builder().uri("/").body(Body::empty()).unwrap(), &mock_server).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("notice").is_none());
    assert_eq!(body["reviews"][0]["id"], 12);
    assert_eq!(body["reviews"][1]["name"], "Ravi");
}
