use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Fixed-window request limiter for the public endpoints. One shared
/// counter per process; the window is the current wall-clock second.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rps: u64,
    // Upper 32 bits: window (unix second), lower 32 bits: request count.
    slot: Arc<AtomicU64>,
}

impl RateLimiter {
    fn new(rps: u32) -> Self {
        Self {
            rps: rps.max(1) as u64,
            slot: Arc::new(AtomicU64::new(0)),
        }
    }

    fn allow(&self) -> bool {
        let second = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() & 0xFFFF_FFFF)
            .unwrap_or(0);

        let mut current = self.slot.load(Ordering::Relaxed);
        loop {
            let (window, count) = (current >> 32, current & 0xFFFF_FFFF);
            let next = if window == second {
                if count >= self.rps {
                    return false;
                }
                (window << 32) | (count + 1)
            } else {
                (second << 32) | 1
            };
            match self.slot.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }
}

pub async fn rps_middleware(
    State(state): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.allow() {
        return (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded").into_response();
    }
    next.run(req).await
}

pub fn new_rps_state(rps: u32) -> RateLimiter {
    RateLimiter::new(rps)
}
