//! Test doubles for the pacing and notification seams

use async_trait::async_trait;
use mockall::mock;
use sheet_sync::core::batch::CompletionNotifier;
use sheet_sync::core::rate_limiter::RateLimiter;
use std::sync::Arc;

mock! {
    pub Limiter {}

    #[async_trait]
    impl RateLimiter for Limiter {
        async fn wait_before_next(&self);
    }
}

mock! {
    pub Notifier {}

    impl CompletionNotifier for Notifier {
        fn notify(&self, message: &str);
    }
}

/// Limiter expecting exactly `calls` waits
pub fn limiter_expecting(calls: usize) -> Box<MockLimiter> {
    let mut limiter = MockLimiter::new();
    limiter.expect_wait_before_next().times(calls).return_const(());
    Box::new(limiter)
}

/// Notifier expecting one message containing `fragment`
pub fn notifier_expecting(fragment: &'static str) -> Arc<MockNotifier> {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(move |message| message.contains(fragment))
        .times(1)
        .return_const(());
    Arc::new(notifier)
}
