//! HTTP route handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::llm::{GeminiClient, TextGenerator};
use crate::task::{MockTaskGenerator, TaskBatch, TaskProcessor, TaskStore};

use super::auth;
use super::tasks;
use super::types::HealthResponse;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Generation pipeline shared by all requests
    pub batch: TaskBatch,
    /// Task list per authenticated user
    pub stores: RwLock<HashMap<String, TaskStore>>,
}

impl AppState {
    /// State wired to the configured Gemini endpoint.
    pub fn from_config(config: Config) -> Self {
        let generator = Arc::new(GeminiClient::with_base_url(
            config.gemini.api_key.clone(),
            config.gemini.model.clone(),
            config.gemini.api_base.clone(),
        ));
        Self::new(config, generator, Arc::new(MockTaskGenerator::new()))
    }

    /// State with an explicit generator and fallback.
    pub fn new(
        config: Config,
        generator: Arc<dyn TextGenerator>,
        fallback: Arc<MockTaskGenerator>,
    ) -> Self {
        let processor = TaskProcessor::new(generator, fallback, config.gemini.options.clone());
        Self {
            config,
            batch: TaskBatch::new(Arc::new(processor)),
            stores: RwLock::new(HashMap::new()),
        }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/api/generate-tasks", post(tasks::generate_tasks))
        .route("/api/tasks", get(tasks::list_tasks).put(tasks::set_tasks))
        .route("/api/tasks/progress", get(tasks::progress))
        .route("/api/tasks/:id/toggle", post(tasks::toggle_task))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    if config.ai_enabled() {
        tracing::info!(model = %config.gemini.model, "Model generation enabled");
    } else {
        tracing::warn!("GEMINI_API_KEY not set; template tasks until it is");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ai_enabled: state.config.ai_enabled(),
    })
}
