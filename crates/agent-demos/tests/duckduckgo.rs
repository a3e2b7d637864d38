//! DuckDuckGo client against a local HTTP server

use agent_demos::{DemoConfig, DuckDuckGoSearch, WebSearch};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"<html><body>
<div class="serp__results">
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fweather.example.com%2Ftokyo&amp;rut=1">Tokyo Weather &amp; Forecast</a>
      </h2>
      <a class="result__snippet" href="//duckduckgo.com/l/?uddg=x">Clear skies, <b>22&#176;C</b>.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://news.example.com/tokyo">Tokyo today</a>
      </h2>
      <a class="result__snippet" href="https://news.example.com/tokyo">Humid evening.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://third.example.com">Third</a>
      </h2>
      <a class="result__snippet" href="https://third.example.com">Not requested.</a>
    </div>
  </div>
</div>
</body></html>"#;

#[tokio::test]
async fn test_search_parses_and_truncates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "Tokyo weather on 2025-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let search = DuckDuckGoSearch::new(server.uri()).unwrap();
    let results = search.search("Tokyo weather on 2025-01-01", 2).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Tokyo Weather & Forecast");
    assert_eq!(results[0].link, "https://weather.example.com/tokyo");
    assert_eq!(results[0].snippet, "Clear skies, 22\u{b0}C.");
    assert_eq!(results[1].link, "https://news.example.com/tokyo");
}

#[tokio::test]
async fn test_search_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let config = DemoConfig::builder().search_base_url(server.uri()).build().unwrap();
    let search = DuckDuckGoSearch::from_config(&config).unwrap();
    let err = search.search("anything", 5).await.unwrap_err();
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn test_search_without_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>No results.</html>"))
        .mount(&server)
        .await;

    let search = DuckDuckGoSearch::new(format!("{}/", server.uri())).unwrap();
    assert!(search.search("zzzz", 5).await.unwrap().is_empty());
}
