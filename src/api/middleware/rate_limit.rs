//! Shared rate limiting middleware.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor,
};

/// Creates the shared request limiter.
///
/// # Limits
///
/// One budget of 60 requests per 60-second window shared across ALL callers
/// (global key, not per-client). Requests over the budget receive
/// `429 Too Many Requests`. The window is enforced as a burst of 60 with a
/// one-per-second refill.
pub fn layer() -> GovernorLayer<GlobalKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(GlobalKeyExtractor)
            .per_second(1)
            .burst_size(60)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
