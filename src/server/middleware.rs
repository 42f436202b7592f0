//! Request pipeline middleware

use crate::core::error::{ApiError, INTERNAL_ERROR_MESSAGE};
use axum::{extract::Request, middleware::Next, response::IntoResponse, response::Response};
use chrono::{SecondsFormat, Utc};
use std::any::Any;
use std::time::Instant;

/// Log method, path and timestamp of every request, then its outcome
///
/// Purely observational: the request is always passed on unchanged.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    tracing::info!(%method, %path, %timestamp, "request received");

    let started = Instant::now();
    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}

/// Answer a panicking handler with the regular internal error body
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        INTERNAL_ERROR_MESSAGE.to_string()
    };

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
