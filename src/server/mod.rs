//! HTTP server wiring.

mod handlers;
mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::logging::{self, Attr, Logger};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub log: Logger,
}

/// Build the router with request-id, request logging and timeout layers.
pub fn build_router(state: AppState) -> Router {
    let timeout = state.config.endpoint_execution_timeout();
    let log = state.log.clone();

    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(axum_middleware::from_fn_with_state(log, middleware::log_requests))
        // Outermost: every inner layer sees the request context.
        .layer(axum_middleware::from_fn(middleware::request_id))
}

/// The service's HTTP server.
pub struct AppServer {
    config: Arc<Config>,
    log: Logger,
    router: Router,
}

impl AppServer {
    pub fn new(config: Arc<Config>, log: &Logger) -> Self {
        let router = build_router(AppState {
            config: Arc::clone(&config),
            log: log.clone(),
        });

        Self {
            config,
            log: log.clone(),
            router,
        }
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> ServiceResult<()> {
        let log = logging::wrap(
            &self.log,
            [logging::with_op(concat!(module_path!(), "::AppServer::run"))],
        );

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            log.error("unable to start tcp listener", [logging::error(&e)]);
            ServiceError::Bind(e)
        })?;

        let address = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or(addr);
        log.info("server is running", [Attr::new("address", address)]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(log.clone()))
            .await
            .map_err(|e| {
                log.error("server stopped unexpectedly", [logging::error(&e)]);
                ServiceError::Serve(e)
            })
    }
}

async fn shutdown_signal(log: Logger) {
    let log = logging::wrap(
        &log,
        [logging::with_op(concat!(module_path!(), "::shutdown_signal"))],
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        log.error("unable to listen for shutdown signal", [logging::error(&e)]);
        std::future::pending::<()>().await;
    }
    log.info("gracefully stopping server...", []);
}

#[cfg(test)]
mod tests {
    use super::middleware::REQUEST_ID_HEADER;
    use super::*;
    use crate::config::{EnvType, ServerConfig, TimeoutsConfig};
    use crate::logging::testing::Capture;
    use crate::logging::{JsonHandler, Level};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            env: EnvType::Testing,
            application_name: "statistic-service".to_string(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            timeouts: TimeoutsConfig {
                endpoint_execution_timeout_ms: 1000,
            },
        })
    }

    fn test_router() -> (Router, Capture) {
        let capture = Capture::default();
        let log = Logger::new(Arc::new(JsonHandler::new(Level::Debug, capture.writer())));
        let router = build_router(AppState {
            config: test_config(),
            log,
        });
        (router, capture)
    }

    fn lines(capture: &Capture) -> Vec<Value> {
        capture
            .contents()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_health_generates_request_id() {
        let (router, capture) = test_router();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(uuid::Uuid::parse_str(&id).is_ok());

        let lines = lines(&capture);
        let messages: Vec<&str> = lines.iter().map(|l| l["msg"].as_str().unwrap()).collect();
        assert_eq!(
            messages,
            ["request started", "health check requested", "request finished"]
        );
        for line in &lines {
            assert_eq!(line["request_id"], id.as_str());
            assert_eq!(line["username"], "");
        }
        assert!(lines[1]["op"].as_str().unwrap().ends_with("::health_check"));
        assert_eq!(lines[2]["status"], 200);
        assert_eq!(lines[2]["path"], "/health");
    }

    #[tokio::test]
    async fn test_inbound_request_id_reused() {
        let (router, capture) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
        assert!(lines(&capture)
            .iter()
            .all(|line| line["request_id"] == "abc-123"));
    }
}
