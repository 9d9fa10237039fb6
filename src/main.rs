//! Statistic Service
//!
//! Serves statistic endpoints and provides the contextual, structured
//! logging every component of the service emits through.

use std::sync::Arc;

mod config;
mod context;
mod error;
mod logging;
mod server;

use crate::config::Config;
use crate::error::ServiceError;
use crate::logging::{Attr, LogWriter};
use crate::server::AppServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Nothing to log through yet; the logger depends on the configuration.
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        ServiceError::from(e)
    })?;
    let config = Arc::new(config);

    let base = logging::for_env(config.env, LogWriter::stdout());
    logging::init_tracing(&base);

    let log = logging::wrap(
        &base,
        [
            logging::with_op(concat!(module_path!(), "::main")),
            logging::with_attr("application", config.application_name.as_str()),
        ],
    );

    log.info(
        format!("Starting {} v{}", config.application_name, env!("CARGO_PKG_VERSION")),
        [],
    );
    log.info(
        "Configuration loaded",
        [
            Attr::new("env", config.env.as_str()),
            Attr::new("host", config.server.host.as_str()),
            Attr::new("port", config.server.port),
            Attr::new(
                "endpoint_execution_timeout_ms",
                config.timeouts.endpoint_execution_timeout_ms,
            ),
        ],
    );

    let server = AppServer::new(Arc::clone(&config), &base);
    log.info("app successfully created", []);

    server.run().await.map_err(|e| {
        log.error("server terminated", [logging::error(&e)]);
        anyhow::anyhow!(e)
    })?;

    Ok(())
}
