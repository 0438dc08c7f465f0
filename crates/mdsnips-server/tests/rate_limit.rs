use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mdsnips_server::config::RateLimitConfig;
use mdsnips_server::middleware::rate_limit::RateLimiter;

fn limiter(max_requests: u32, window: Duration) -> RateLimiter {
    RateLimiter::new(&RateLimitConfig {
        max_requests,
        window,
    })
}

#[test]
fn window_allows_exactly_max_requests() {
    let limiter = limiter(3, Duration::from_secs(60));
    assert!(limiter.check("a"));
    assert!(limiter.check("a"));
    assert!(limiter.check("a"));
    assert!(!limiter.check("a"));
    assert!(limiter.check("b"));
}

#[test]
fn window_resets_after_it_elapses() {
    let limiter = limiter(1, Duration::from_millis(50));
    assert!(limiter.check("a"));
    assert!(!limiter.check("a"));
    thread::sleep(Duration::from_millis(60));
    assert!(limiter.check("a"));
}

#[test]
fn concurrent_clients_share_one_budget() {
    let limiter = Arc::new(limiter(100, Duration::from_secs(60)));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            thread::spawn(move || (0..25).filter(|_| limiter.check("shared")).count())
        })
        .collect();
    let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(allowed, 100);
}
