//! Application startup and lifecycle management.

use crate::config::FeedbackConfig;
use crate::handlers::{
    feedback::analyze_response,
    health::{health_check, readiness_check},
    metrics::metrics,
};
use crate::services::providers::openai::{OpenAiProvider, OpenAiSettings};
use crate::services::providers::CompletionProvider;
use crate::services::FeedbackHandler;
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub feedback: Arc<FeedbackHandler>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            feedback: Arc::new(FeedbackHandler::new(provider, model)),
        }
    }
}

/// Build the HTTP router. `allowed_origin` is the one browser origin granted
/// credentialed cross-origin access.
pub fn build_router(state: AppState, allowed_origin: &str) -> Result<Router, AppError> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid CORS origin '{}': {}",
            allowed_origin,
            e
        ))
    })?;

    let app = Router::new()
        .route("/analyze-response", post(analyze_response))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .with_state(state)
        // Add metrics middleware
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        // Credentialed CORS cannot use wildcards, so methods and headers mirror the preflight.
        // A list (not an exact origin) leaves the allow-origin header off for other origins.
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list([origin]))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        );

    Ok(app)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the OpenAI provider described by `config`.
    pub async fn build(config: FeedbackConfig) -> Result<Self, AppError> {
        let provider = OpenAiProvider::new(OpenAiSettings {
            api_key: config.openai.api_key.clone(),
            base_url: config.openai.base_url.clone(),
            timeout: Duration::from_secs(config.openai.timeout_secs),
        })
        .map_err(|e| {
            tracing::error!("Failed to create OpenAI client: {}", e);
            AppError::InternalError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            model = %config.openai.model,
            base_url = %config.openai.base_url,
            "Initialized OpenAI completion provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: FeedbackConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(provider, config.openai.model.clone());
        let router = build_router(state, &config.cors.allowed_origin)?;

        // Port 0 = random port for testing
        let address = config.common.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Feedback service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
