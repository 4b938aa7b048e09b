//! Pacing between remote calls
//!
//! A run calls [`RateLimiter::wait_before_next`] before every batch (or
//! every row that issues calls). The limiter decides how long that waits.

mod strategies;


pub use strategies::{FixedDelay, NoDelay, QuotaLimiter};

use crate::config::RateLimitStrategy;
use async_trait::async_trait;
use std::time::Duration;

/// Single suspension point between successive remote calls
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn wait_before_next(&self);

    /// Forget earlier calls so the next run starts without a wait
    fn reset(&self) {}
}

/// Build the limiter for a configured strategy and period.
///
/// A zero period always yields [`NoDelay`].
pub fn from_settings(strategy: RateLimitStrategy, period: Duration) -> Box<dyn RateLimiter> {
    if period.is_zero() {
        return Box::new(NoDelay);
    }
    match strategy {
        RateLimitStrategy::FixedDelay => Box::new(FixedDelay::new(period)),
        RateLimitStrategy::TokenBucket => match QuotaLimiter::per_period(period) {
            Some(limiter) => Box::new(limiter),
            None => Box::new(NoDelay),
        },
        RateLimitStrategy::None => Box::new(NoDelay),
    }
}
