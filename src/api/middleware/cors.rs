//! CORS policy.

use axum::http::{HeaderName, HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Local development origins that are always allowed.
const LOCAL_ORIGINS: &[&str] = &[
    "http://127.0.0.1",
    "http://localhost",
    "http://localhost:3000",
    "http://localhost:8080",
    "http://localhost:5173",
];

/// Builds the CORS layer: the localhost allow-list plus one configured
/// production origin, with credentials enabled.
///
/// Because credentials are allowed, origins/methods/headers are explicit
/// lists rather than wildcards.
pub fn layer(production_origin: Option<&str>) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = LOCAL_ORIGINS
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if let Some(origin) = production_origin
        && let Ok(value) = origin.parse::<HeaderValue>()
        && !origins.contains(&value)
    {
        origins.push(value);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-api-key"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 3600))
}
