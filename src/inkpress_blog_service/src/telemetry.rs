//! Tracing setup and per-request span construction.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use color_eyre::eyre::Result;
use tracing::Span;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Install the subscriber stack: env-filtered compact fmt plus span-trace
/// capture for error reports.
pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

/// Every request gets its own span stamped with a fresh request id, so log
/// lines from one request correlate.
pub fn make_span_with_request_id(request: &Request<Body>) -> Span {
    let request_id = Uuid::new_v4();
    tracing::info_span!(
        "http_request",
        %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    tracing::info!("request received")
}

pub fn on_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    tracing::info!(
        status = %response.status(),
        latency_ms = %latency.as_millis(),
        "response sent"
    )
}
