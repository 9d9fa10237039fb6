//! HTTP request handlers.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::context::RequestContext;
use crate::logging;
use crate::server::AppState;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub application: String,
}

/// Liveness check.
///
/// GET /health
pub async fn health_check(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Json<HealthResponse> {
    let log = logging::wrap(
        &state.log,
        [
            logging::with_op(concat!(module_path!(), "::health_check")),
            logging::with_ctx(&ctx),
        ],
    );
    log.debug("health check requested", []);

    Json(HealthResponse {
        status: "ok",
        application: state.config.application_name.clone(),
    })
}
