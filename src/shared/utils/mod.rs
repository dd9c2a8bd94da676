mod logger;
mod rate_limiter;

pub use logger::init_logger;
pub use rate_limiter::RateLimiter;
