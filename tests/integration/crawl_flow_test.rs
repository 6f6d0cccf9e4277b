// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::io::Write;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordcrawl::config::settings::{CrawlSettings, FetchSettings, Settings};
use wordcrawl::crawler::engine::CrawlEngine;
use wordcrawl::crawler::WebCrawler;
use wordcrawl::engines::fetch_engine::FetchEngine;
use wordcrawl::engines::traits::PageParser;
use wordcrawl::utils::profiler::{ProfiledCrawler, Profiler, CRAWL_OPERATION};

async fn serve_html(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

fn fetch_settings() -> FetchSettings {
    FetchSettings {
        ignored_words: vec![],
        request_timeout_seconds: 5,
        user_agent: "wordcrawl-test/0.1".to_string(),
    }
}

fn crawl_settings(start_pages: Vec<String>) -> CrawlSettings {
    CrawlSettings {
        start_pages,
        ignored_urls: vec![],
        max_depth: 3,
        timeout_seconds: 30,
        popular_word_count: 3,
        parallelism: 2,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_counts_words_across_linked_pages() {
    let server = MockServer::start().await;
    serve_html(
        &server,
        "/index.html",
        r##"<html><body>
            <p>rust counts</p>
            <a href="/a.html">alpha</a>
            <a href="/b.html">beta</a>
            <a href="/missing.html">missing</a>
        </body></html>"##,
    )
    .await;
    serve_html(
        &server,
        "/a.html",
        r##"<html><body>rust rust engine <a href="/index.html">home</a></body></html>"##,
    )
    .await;
    serve_html(&server, "/b.html", "<html><body>concurrent engine</body></html>").await;
    // /missing.html is not mounted and yields 404

    let parser: Arc<dyn PageParser> = Arc::new(FetchEngine::new(&fetch_settings()).unwrap());
    let seeds = vec![format!("{}/index.html", server.uri())];
    let engine = CrawlEngine::from_settings(&crawl_settings(seeds.clone()), parser).unwrap();

    let profiler = Arc::new(Profiler::new());
    let crawler = ProfiledCrawler::new(engine, Arc::clone(&profiler));

    let result = crawler.crawl(&seeds).await.unwrap();

    // index, a, b parsed; missing claimed but failed with 404
    assert_eq!(result.urls_visited, 4);
    assert_eq!(
        result.word_counts,
        vec![
            ("rust".to_string(), 3),
            ("engine".to_string(), 2),
            ("concurrent".to_string(), 1),
        ]
    );
    assert_eq!(profiler.recorded_calls(CRAWL_OPERATION), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ignored_seed_produces_empty_result_without_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>secret</body></html>", "text/html"),
        )
        .expect(0)
        .mount(&server)
        .await;

    let seeds = vec![format!("{}/admin", server.uri())];
    let mut settings = crawl_settings(seeds.clone());
    settings.ignored_urls = vec![".*/admin".to_string()];

    let parser: Arc<dyn PageParser> = Arc::new(FetchEngine::new(&fetch_settings()).unwrap());
    let engine = CrawlEngine::from_settings(&settings, parser).unwrap();

    let result = engine.crawl(&seeds).await.unwrap();

    assert!(result.word_counts.is_empty());
    assert_eq!(result.urls_visited, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_driven_by_configuration_file() {
    let server = MockServer::start().await;
    serve_html(&server, "/solo.html", "<html><body>hello hello world</body></html>").await;

    let mut config_file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        config_file,
        r#"{{
            "crawl": {{
                "start_pages": ["{}/solo.html"],
                "max_depth": 1,
                "timeout_seconds": 10,
                "popular_word_count": 10,
                "parallelism": 1
            }}
        }}"#,
        server.uri()
    )
    .unwrap();
    config_file.flush().unwrap();

    let settings = Settings::new(config_file.path().to_str().unwrap()).unwrap();

    let parser: Arc<dyn PageParser> = Arc::new(FetchEngine::new(&settings.fetch).unwrap());
    let engine = CrawlEngine::from_settings(&settings.crawl, parser).unwrap();

    let result = engine.crawl(&settings.crawl.start_pages).await.unwrap();

    assert_eq!(result.urls_visited, 1);
    assert_eq!(
        result.word_counts,
        vec![("hello".to_string(), 2), ("world".to_string(), 1)]
    );

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["urlsVisited"], 1);
    assert_eq!(json["wordCounts"]["hello"], 2);
}
