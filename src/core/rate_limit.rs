use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default request cap per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 30;

/// Default window length in seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 60;

/// Default bound on tracked client keys.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Localized message returned with every 429.
pub const RATE_LIMIT_MESSAGE: &str = "Muitas solicitações. Tente novamente em um minuto.";

#[derive(Debug)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// In-memory per-client fixed-window rate limiter.
///
/// One counter per client key; the window resets wholesale when it lapses,
/// it does not slide. Counters live in a concurrent map so the per-key
/// read-modify-write stays atomic under preemptive scheduling. The map is
/// bounded: inserts past `max_entries` first evict expired windows.
///
/// Single-instance semantics only - horizontally scaled deployments keep
/// independent counters and inflate the effective rate.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    max_requests: u32,
    window: Duration,
    max_entries: usize,
    windows: DashMap<String, WindowEntry>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                max_requests,
                window,
                max_entries,
                windows: DashMap::new(),
            }),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_MAX_REQUESTS,
            Duration::from_secs(DEFAULT_WINDOW_SECS),
            DEFAULT_MAX_ENTRIES,
        )
    }

    /// Returns true if the request is allowed, false if the client is over
    /// its window cap. Called once per inbound request before any other
    /// processing.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();

        if !self.inner.windows.contains_key(key) && self.inner.windows.len() >= self.inner.max_entries {
            self.evict_expired(now);
        }

        let mut entry = self
            .inner
            .windows
            .entry(key.to_string())
            .or_insert_with(|| WindowEntry {
                count: 0,
                reset_at: now + self.inner.window,
            });

        if now > entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.inner.window;
            true
        } else if entry.count >= self.inner.max_requests {
            false
        } else {
            entry.count += 1;
            true
        }
    }

    /// Drop entries whose windows have already lapsed.
    pub fn evict_expired(&self, now: Instant) {
        self.inner.windows.retain(|_, entry| entry.reset_at >= now);
    }

    /// Number of tracked client keys.
    pub fn tracked_keys(&self) -> usize {
        self.inner.windows.len()
    }
}
