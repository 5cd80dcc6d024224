//! Request/response audit logging.
//!
//! Every request is logged with method, path, status, latency and client
//! metadata. The sink is chosen at boot: `LOG_FORMAT=json` routes these
//! through the structured JSON subscriber, `text` through the plain one.

use axum::{
    extract::{ConnectInfo, Request},
    http::header,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

pub async fn layer(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    // Absent when the router is driven without a TCP socket (tests).
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        target: "audit",
        %method,
        %path,
        status,
        latency_ms,
        %ip,
        %user_agent,
        "request completed"
    );

    response
}
