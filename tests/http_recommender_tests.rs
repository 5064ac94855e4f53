use std::time::Duration;

use shelfdive::core::frame::Book;
use shelfdive::remote::{EnrichmentProvider, HttpRecommender, RemoteError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn test_book() -> Book {
    Book {
        id: "42".to_string(),
        title: "Dune".to_string(),
        authors: vec!["Frank Herbert".to_string()],
        description: Some("Desert planet politics.".to_string()),
        genres: vec!["Science Fiction".to_string()],
    }
}

fn recommender_for(server: &MockServer) -> HttpRecommender {
    HttpRecommender::new(server.uri(), Duration::from_secs(5))
}

fn recommendation_body() -> serde_json::Value {
    serde_json::json!([
        {
            "book": {
                "id": "7",
                "title": "Hyperion",
                "authors": ["Dan Simmons"],
                "description": "Pilgrims tell their tales.",
                "genres": ["Science Fiction"],
                "cover_image_url": "https://covers.example/7.jpg"
            },
            "similarity_score": 0.83
        },
        {
            "book": {
                "id": "9",
                "title": "Foundation",
                "authors": ["Isaac Asimov"],
                "description": null,
                "genres": ["Science Fiction"],
                "cover_image_url": null
            },
            "similarity_score": 0.74
        }
    ])
}

// ============================================================================
// /explain
// ============================================================================

#[tokio::test]
async fn test_fetch_explanation_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/explain"))
        .and(body_partial_json(serde_json::json!({
            "query_text": "desert sci-fi epics",
            "similarity_score": 0.8
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "match_score": 80,
            "confidence": "HIGH",
            "summary": "Recommended because it's a good match for your interest in 'desert sci-fi epics'.",
            "details": {
                "genres_contribution": 40,
                "description_keywords_contribution": 15,
                "authors_contribution": 0
            }
        })))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let explanation = recommender
        .fetch_explanation("desert sci-fi epics", &test_book(), 0.8)
        .await
        .unwrap();

    assert!(explanation.summary.starts_with("Recommended because"));
    assert_eq!(explanation.confidence, "HIGH");
    assert_eq!(explanation.details["genres_contribution"], 40);
    assert!(explanation.matching_features.is_empty());
}

#[tokio::test]
async fn test_fetch_explanation_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/explain"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "detail": "Internal server error during explanation generation."
        })))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let result = recommender
        .fetch_explanation("anything", &test_book(), 0.5)
        .await;

    match result {
        Err(RemoteError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("explanation generation"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_explanation_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/explain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let result = recommender
        .fetch_explanation("anything", &test_book(), 0.5)
        .await;

    assert!(matches!(result, Err(RemoteError::Parse(_))));
}

#[tokio::test]
async fn test_fetch_explanation_clamps_out_of_range_score() {
    let mock_server = MockServer::start().await;

    // The service validates 0.0 <= similarity_score <= 1.0; the client
    // clamps rather than tripping a 422.
    Mock::given(method("POST"))
        .and(path("/explain"))
        .and(body_partial_json(serde_json::json!({ "similarity_score": 1.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "match_score": 100,
            "confidence": "VERY HIGH",
            "summary": "Top match.",
            "details": {}
        })))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let explanation = recommender
        .fetch_explanation("q", &test_book(), 1.4)
        .await
        .unwrap();
    assert_eq!(explanation.summary, "Top match.");
}

// ============================================================================
// /recommend/title
// ============================================================================

#[tokio::test]
async fn test_fetch_related_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommend/title"))
        .and(body_partial_json(serde_json::json!({
            "title": "Dune",
            "top_k": 6
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body()))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let related = recommender.fetch_related("Dune", 6).await.unwrap();

    assert_eq!(related.len(), 2);
    assert_eq!(related[0].book.title, "Hyperion");
    assert_eq!(related[0].match_percent(), 83);
    assert!(related[1].book.description.is_none());
}

#[tokio::test]
async fn test_fetch_related_404_is_empty_list() {
    let mock_server = MockServer::start().await;

    // The service 404s when nothing clears the similarity threshold;
    // that is a valid empty result, not an error.
    Mock::given(method("POST"))
        .and(path("/recommend/title"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Book with title 'Unknown' not found or no recommendations met the similarity threshold."
        })))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let related = recommender.fetch_related("Unknown", 6).await.unwrap();
    assert!(related.is_empty());
}

#[tokio::test]
async fn test_fetch_related_500_is_still_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommend/title"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let result = recommender.fetch_related("Dune", 6).await;
    assert!(matches!(result, Err(RemoteError::Api { status: 500, .. })));
}

// ============================================================================
// /recommend/query
// ============================================================================

#[tokio::test]
async fn test_search_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommend/query"))
        .and(body_partial_json(serde_json::json!({
            "query": "space opera",
            "top_k": 12
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body()))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let results = recommender.search("space opera", 12).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].book.title, "Foundation");
}

#[tokio::test]
async fn test_search_empty_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommend/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let recommender = recommender_for(&mock_server);
    let results = recommender.search("gibberish", 12).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Port 1 refuses connections
    let recommender = HttpRecommender::new(
        "http://127.0.0.1:1".to_string(),
        Duration::from_millis(500),
    );
    let result = recommender.search("anything", 5).await;
    assert!(matches!(result, Err(RemoteError::Network(_))));
}
