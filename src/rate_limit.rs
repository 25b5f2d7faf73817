use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use axum::response::IntoResponse;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Fixed-window request ceiling, shared across all clients of this process.
/// The counter resets when the window rolls over; there is no per-IP state.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    inner: Mutex<Window>,
}

struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            inner: Mutex::new(Window {
                started: Instant::now(),
                count: 0,
            }),
        }
    }

    /// Registers one request. Returns false once the ceiling for the current
    /// window is spent.
    pub fn try_acquire(&self) -> bool {
        let mut w = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if w.started.elapsed() >= self.window {
            w.started = Instant::now();
            w.count = 0;
        }
        if w.count < self.max_requests {
            w.count += 1;
            true
        } else {
            false
        }
    }
}

pub async fn limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !state.rate_limiter.try_acquire() {
        warn!(uri = %req.uri(), "request rejected by rate limiter");
        return ApiError::RateLimited.into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_ceiling_then_rejects() {
        let limiter = RateLimiter::new(3, Duration::from_secs(3600));
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn window_rollover_resets_counter() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.try_acquire());
    }
}
