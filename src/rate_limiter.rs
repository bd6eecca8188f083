//! Per-client minimum-interval rate limiter
//!
//! Each client may make one request per `min_interval`. Keyed by
//! client address. Entries whose window has passed are dropped on every
//! check, so the map only holds clients seen within the last interval.

use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub struct RateLimiter {
    min_interval: Duration,
    last_allowed: Mutex<FxHashMap<String, Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_allowed: Mutex::new(FxHashMap::default()),
        }
    }

    /// Check and record a request from `client_id` now
    pub async fn check(&self, client_id: &str) -> bool {
        self.check_at(client_id, Instant::now()).await
    }

    /// Check and record a request at an explicit instant
    pub async fn check_at(&self, client_id: &str, now: Instant) -> bool {
        let mut lock = self.last_allowed.lock().await;
        let min_interval = self.min_interval;

        // Expired windows carry no state
        lock.retain(|_, last| now.saturating_duration_since(*last) < min_interval);

        if let Some(last) = lock.get(client_id) {
            if now.saturating_duration_since(*last) < self.min_interval {
                return false;
            }
        }

        lock.insert(client_id.to_string(), now);
        true
    }

    /// Clients currently inside their window
    pub async fn tracked_clients(&self) -> usize {
        self.last_allowed.lock().await.len()
    }
}
