//! Integration tests for `SerpApiClient` using wiremock HTTP mocks.

use std::time::Duration;

use mktg_context::{collect_news, ContextError, SerpApiClient};
use mktg_core::NewsSource;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer, timeout_secs: u64) -> SerpApiClient {
    SerpApiClient::with_base_url("test-key", timeout_secs, &format!("{}/search", server.uri()))
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_news_normalizes_google_news_results() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "search_metadata": {"status": "Success"},
        "news_results": [
            {
                "title": "SaaS churn hits record high",
                "link": "https://news.example/churn",
                "snippet": "Retention budgets tighten",
                "date": "03/01/2025"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "saas churn"))
        .and(query_param("engine", "google_news"))
        .and(query_param("num", "10"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server, 20);
    let items = client
        .fetch_news("saas churn", NewsSource::GoogleNews, 10)
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "SaaS churn hits record high");
    assert_eq!(items[0].url, "https://news.example/churn");
    assert_eq!(items[0].description, "Retention budgets tighten");
    assert_eq!(items[0].published_at, "03/01/2025");
    assert_eq!(items[0].source, NewsSource::GoogleNews);
}

#[tokio::test]
async fn non_200_status_is_an_error_and_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = test_client(&server, 20);
    let err = client
        .search("saas", NewsSource::Reddit, 5)
        .await
        .expect_err("429 should be an error");
    assert!(
        matches!(err, ContextError::SerpApiStatus { status: 429, .. }),
        "expected SerpApiStatus(429), got: {err:?}"
    );

    assert!(client.fetch_news("saas", NewsSource::Reddit, 5).await.is_empty());
}

#[tokio::test]
async fn timeout_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"news_results": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let items = client.fetch_news("saas", NewsSource::GoogleNews, 10).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn collect_news_merges_engines_and_dedups_by_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("engine", "google_news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "news_results": [
                {"title": "Shared story", "link": "https://shared.example/1"},
                {"title": "News only", "link": "https://news.example/2"}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("engine", "reddit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "organic_results": [
                {"title": "Shared story (reddit)", "link": "https://shared.example/1", "snippet": "dup"},
                {"title": "Reddit thread", "link": "https://reddit.example/3", "snippet": "churn talk"}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server, 20);
    let queries = vec!["saas churn".to_string()];
    let items = collect_news(
        &client,
        &queries,
        &[NewsSource::GoogleNews, NewsSource::Reddit],
        5,
    )
    .await;

    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Shared story", "News only", "Reddit thread"]);
    assert_eq!(items[2].source, NewsSource::Reddit);
}
