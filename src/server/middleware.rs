//! Request middleware: correlation ids and request logging.

use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use crate::context::RequestContext;
use crate::logging::{self, Attr, Logger};

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assign a correlation id to every request.
///
/// Reuses an inbound `x-request-id` header when present, otherwise generates
/// a UUID. The id is stored as a [`RequestContext`] extension and echoed on
/// the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestContext::new().with_request_id(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Log the start and end of every request with its correlation data.
pub async fn log_requests(State(log): State<Logger>, request: Request, next: Next) -> Response {
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();
    let log = logging::wrap(
        &log,
        [
            logging::with_op(concat!(module_path!(), "::log_requests")),
            logging::with_ctx(&ctx),
        ],
    );

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    log.info(
        "request started",
        [Attr::new("method", method.as_str()), Attr::new("path", path.as_str())],
    );

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = elapsed_millis(started.elapsed());

    let status = response.status();
    let attrs = [
        Attr::new("method", method),
        Attr::new("path", path),
        Attr::new("status", status.as_u16()),
        Attr::new("elapsed_ms", elapsed_ms),
    ];
    if status.is_server_error() {
        log.error("request finished", attrs);
    } else {
        log.info("request finished", attrs);
    }

    response
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_millis() {
        assert_eq!(elapsed_millis(Duration::ZERO), 0);
        assert_eq!(elapsed_millis(Duration::from_micros(1999)), 1);
        assert_eq!(elapsed_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(elapsed_millis(Duration::MAX), u64::MAX);
    }
}
