#[cfg(test)]
mod tests {
    use crate::domain::services::visited_registry::VisitedRegistry;
    use std::sync::Arc;

    #[test]
    fn test_first_claim_succeeds_second_fails() {
        let registry = VisitedRegistry::new();

        assert!(registry.claim("http://example.com/a"));
        assert!(!registry.claim("http://example.com/a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_urls_claimed_independently() {
        let registry = VisitedRegistry::new();

        assert!(registry.claim("http://example.com/a"));
        assert!(registry.claim("http://example.com/b"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry() {
        let registry = VisitedRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_exactly_one_winner_under_concurrency() {
        let registry = Arc::new(VisitedRegistry::new());

        let mut handles = Vec::new();
        for _ in 0..64 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(
                async move { registry.claim("http://example.com/contested") },
            ));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(registry.len(), 1);
    }
}
