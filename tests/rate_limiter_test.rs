//! Rate limiter tests
//!
//! Tests the minimum-interval spacing both source clients rely on.

use std::time::{Duration, Instant};

use shikisync::shared::utils::RateLimiter;

#[tokio::test]
async fn test_first_request_is_not_delayed() {
    let limiter = RateLimiter::new(1.0);
    let start = Instant::now();
    limiter.wait().await;
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn test_back_to_back_requests_are_spaced() {
    let limiter = RateLimiter::new(20.0); // 50ms interval
    limiter.wait().await;
    let start = Instant::now();
    limiter.wait().await;
    assert!(start.elapsed() >= Duration::from_millis(40));
}

#[tokio::test]
async fn test_min_interval_follows_request_rate() {
    let limiter = RateLimiter::new(5.0);
    assert_eq!(limiter.min_interval(), Duration::from_millis(200));
}
