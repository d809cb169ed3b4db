#[cfg(test)]
mod tests {
    use camwatch::libs::cache::{Clock, TtlCache};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    /// Hand-cranked clock so expiry is tested without sleeping.
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self { now: Mutex::new(Instant::now()) })
        }

        fn advance(&self, d: Duration) {
            *self.now.lock().unwrap() += d;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn test_get_returns_live_value() {
        let clock = ManualClock::new();
        let mut cache: TtlCache<&str, i32> = TtlCache::with_clock(Duration::from_secs(60), 4, clock.clone());

        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get(&"a"), Some(1));
    }

    #[test]
    fn test_value_expires_after_ttl() {
        let clock = ManualClock::new();
        let mut cache: TtlCache<&str, i32> = TtlCache::with_clock(Duration::from_secs(60), 4, clock.clone());

        cache.insert("a", 1);
        clock.advance(Duration::from_secs(61));
        assert_eq!(cache.get(&"a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reinsert_refreshes_ttl() {
        let clock = ManualClock::new();
        let mut cache: TtlCache<&str, i32> = TtlCache::with_clock(Duration::from_secs(60), 4, clock.clone());

        cache.insert("a", 1);
        clock.advance(Duration::from_secs(40));
        cache.insert("a", 2);
        clock.advance(Duration::from_secs(40));

        assert_eq!(cache.get(&"a"), Some(2));
    }

    #[test]
    fn test_insert_drops_expired_entries_first() {
        let clock = ManualClock::new();
        let mut cache: TtlCache<&str, i32> = TtlCache::with_clock(Duration::from_secs(60), 4, clock.clone());

        cache.insert("a", 1);
        cache.insert("b", 2);
        clock.advance(Duration::from_secs(61));
        cache.insert("c", 3);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_full_cache_evicts_soonest_expiring() {
        let clock = ManualClock::new();
        let mut cache: TtlCache<&str, i32> = TtlCache::with_clock(Duration::from_secs(60), 2, clock.clone());

        cache.insert("old", 1);
        clock.advance(Duration::from_secs(10));
        cache.insert("newer", 2);
        clock.advance(Duration::from_secs(10));
        cache.insert("newest", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"old"), None);
        assert_eq!(cache.get(&"newer"), Some(2));
        assert_eq!(cache.get(&"newest"), Some(3));
    }

    #[test]
    fn test_clear() {
        let mut cache: TtlCache<&str, i32> = TtlCache::new(Duration::from_secs(60), 4);
        cache.insert("a", 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }
}
