//! Request-scoped trace identifier.
//!
//! [`propagate_trace_id`] runs on every request: it takes the inbound
//! `x-trace-id` header when it holds a UUID (otherwise generates one), stores
//! the [`TraceId`] in the request extensions, logs the request inside a span
//! carrying the id, and echoes the id back in the response header.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Attach a [`TraceId`] to the request and log its start and completion.
pub async fn propagate_trace_id(mut request: Request, next: Next) -> Response {
    let trace_id = TraceId::from_headers(request.headers()).unwrap_or_else(TraceId::generate);
    request.extensions_mut().insert(trace_id);

    let span = tracing::info_span!(
        "request",
        trace_id = %trace_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let started = Instant::now();

    let mut response = async move {
        tracing::info!("Request started");
        next.run(request).await
    }
    .instrument(span.clone())
    .await;

    span.in_scope(|| {
        tracing::info!(
            status = response.status().as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Extension, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(trace_id): Extension<TraceId>| async move { trace_id.to_string() }),
            )
            .layer(axum::middleware::from_fn(propagate_trace_id))
    }

    #[test]
    fn from_str_round_trips() {
        let uuid = Uuid::nil();
        let trace_id: TraceId = uuid.to_string().parse().unwrap();
        assert_eq!(trace_id, TraceId(uuid));
        assert_eq!(trace_id.to_string(), uuid.to_string());
    }

    #[test]
    fn garbage_is_not_a_trace_id() {
        assert!("456".parse::<TraceId>().is_err());
    }

    #[tokio::test]
    async fn generates_and_echoes_trace_id() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response.headers().get(TRACE_ID_HEADER).unwrap().to_str().unwrap().to_string();
        assert!(header.parse::<TraceId>().is_ok());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], header.as_bytes());
    }

    #[tokio::test]
    async fn keeps_inbound_trace_id() {
        let inbound = TraceId::generate();
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(TRACE_ID_HEADER, inbound.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(TRACE_ID_HEADER).unwrap(),
            inbound.to_string().as_str()
        );
    }

    #[tokio::test]
    async fn replaces_malformed_inbound_trace_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(TRACE_ID_HEADER, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header = response.headers().get(TRACE_ID_HEADER).unwrap().to_str().unwrap();
        assert_ne!(header, "not-a-uuid");
        assert!(header.parse::<TraceId>().is_ok());
    }
}
