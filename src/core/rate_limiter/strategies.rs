//! Rate limiting strategies

use super::RateLimiter;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Sleeps a fixed delay before every call except the first
#[derive(Debug)]
pub struct FixedDelay {
    delay: Duration,
    started: AtomicBool,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: AtomicBool::new(false),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn wait_before_next(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Waiting {:?} before next call", self.delay);
            tokio::time::sleep(self.delay).await;
        }
    }

    fn reset(&self) {
        self.started.store(false, Ordering::SeqCst);
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {
    async fn wait_before_next(&self) {}
}

/// Token bucket allowing one call per period
pub struct QuotaLimiter {
    limiter: DefaultDirectRateLimiter,
    period: Duration,
}

impl QuotaLimiter {
    /// `None` for a zero period
    pub fn per_period(period: Duration) -> Option<Self> {
        let quota = Quota::with_period(period)?;
        Some(Self {
            limiter: governor::RateLimiter::direct(quota),
            period,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl std::fmt::Debug for QuotaLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaLimiter")
            .field("period", &self.period)
            .finish()
    }
}

#[async_trait]
impl RateLimiter for QuotaLimiter {
    async fn wait_before_next(&self) {
        self.limiter.until_ready().await;
    }
}
