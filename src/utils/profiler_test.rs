#[cfg(test)]
mod tests {
    use crate::crawler::{CrawlError, WebCrawler};
    use crate::domain::models::crawl_result::CrawlResult;
    use crate::utils::profiler::{ProfiledCrawler, Profiler, CRAWL_OPERATION};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct StubCrawler {
        fail: bool,
    }

    #[async_trait]
    impl WebCrawler for StubCrawler {
        async fn crawl(&self, _seeds: &[String]) -> Result<CrawlResult, CrawlError> {
            if self.fail {
                return Err(CrawlError::PoolUnavailable);
            }
            Ok(CrawlResult {
                word_counts: vec![("word".to_string(), 1)],
                urls_visited: 1,
            })
        }

        fn max_parallelism(&self) -> usize {
            7
        }
    }

    #[test]
    fn test_record_aggregates_calls_and_totals() {
        let profiler = Profiler::new();

        profiler.record("crawl", Duration::from_millis(30));
        profiler.record("crawl", Duration::from_millis(20));

        assert_eq!(profiler.recorded_calls("crawl"), 2);
        assert_eq!(profiler.recorded_calls("never-seen"), 0);
    }

    #[test]
    fn test_report_contains_header_and_operations() {
        let profiler = Profiler::new();
        profiler.record("crawl", Duration::from_millis(50));

        let mut buffer = Vec::new();
        profiler.write_report(&mut buffer).unwrap();
        let report = String::from_utf8(buffer).unwrap();

        assert!(report.starts_with("Run at "));
        assert!(report.contains("crawl: 1 call(s)"));
    }

    #[test]
    fn test_report_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.txt");

        let profiler = Profiler::new();
        profiler.record("crawl", Duration::from_millis(10));
        profiler.write_report_to_path(&path).unwrap();
        profiler.write_report_to_path(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("Run at ").count(), 2);
    }

    #[tokio::test]
    async fn test_decorator_forwards_result_and_records_timing() {
        let profiler = Arc::new(Profiler::new());
        let crawler = ProfiledCrawler::new(StubCrawler { fail: false }, Arc::clone(&profiler));

        let result = crawler.crawl(&["http://s/a".to_string()]).await.unwrap();

        assert_eq!(result.urls_visited, 1);
        assert_eq!(profiler.recorded_calls(CRAWL_OPERATION), 1);
        assert_eq!(crawler.max_parallelism(), 7);
    }

    #[tokio::test]
    async fn test_decorator_records_timing_on_failure_too() {
        let profiler = Arc::new(Profiler::new());
        let crawler = ProfiledCrawler::new(StubCrawler { fail: true }, Arc::clone(&profiler));

        let result = crawler.crawl(&[]).await;

        assert!(result.is_err());
        assert_eq!(profiler.recorded_calls(CRAWL_OPERATION), 1);
    }
}
