//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap application routes with the dispatch boundary and catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve on a listener until shutdown

use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::dispatch::{catch_all_middleware, dispatch_middleware, DispatchInterceptor, ErrorPolicy};
use crate::http::request::RequestUuid;

/// HTTP server hosting application routes behind the dispatch boundary.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server for `routes`, terminating signals with `interceptor`.
    pub fn new(config: ServerConfig, routes: Router, interceptor: DispatchInterceptor) -> Self {
        let router = Self::build_router(&config, routes, interceptor);
        Self { router, config }
    }

    /// Build the full middleware stack around `routes`.
    ///
    /// Layers added later run earlier on the request and later on the
    /// response, so the interceptor sees raised values before the catch-all.
    #[allow(deprecated)]
    pub fn build_router(config: &ServerConfig, routes: Router, interceptor: DispatchInterceptor) -> Router {
        let policy = ErrorPolicy {
            expose_details: config.errors.expose_details,
        };

        routes
            .layer(middleware::from_fn_with_state(interceptor, dispatch_middleware))
            .layer(middleware::from_fn_with_state(policy, catch_all_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = shutdown.recv() => {}
        _ = ctrl_c => {}
    }
    tracing::info!("Shutdown signal received");
}
