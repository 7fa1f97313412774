use axum::{
    Json, Router,
    extract::{ConnectInfo, DefaultBodyLimit, State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use super::error::ApiError;
use super::protocol::{HealthResponse, RenderRequest, RenderResponse, StatusResponse};
use super::rate_limit::RateLimiter;
use crate::config::{self, ChatmarkConfig};
use crate::markdown::Renderer;

pub struct AppState {
    pub config: ChatmarkConfig,
    pub renderer: Renderer,
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: ChatmarkConfig) -> Self {
        Self {
            renderer: Renderer::new(config.markdown),
            limiter: RateLimiter::new(&config.rate_limit),
            config,
        }
    }
}

pub async fn run(config: ChatmarkConfig) -> anyhow::Result<()> {
    config::validate(&config)?;

    let is_loopback = config.gateway.bind == "127.0.0.1" || config.gateway.bind == "::1";
    let addr = format!("{}:{}", config.gateway.bind, config.gateway.port);

    info!(
        rate_limit = config.rate_limit.enabled,
        rpm = config.rate_limit.requests_per_minute,
        "rate limiter configured"
    );

    let app = router(Arc::new(AppState::new(config)))?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;

    info!("chatmark gateway listening on {addr}");
    if is_loopback {
        info!("bound to loopback, local access only");
    } else {
        warn!("bound to {addr}, reachable from other hosts");
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// Build the HTTP routes over shared state.
pub fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.gateway.cors_origins)?;
    let body_limit = state.config.gateway.max_content_length;

    Ok(Router::new()
        .route("/api/render", post(render))
        .route("/api/health", get(health))
        .route("/api/status", get(status))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state))
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|origin| origin == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| anyhow::anyhow!("invalid CORS origin '{origin}': {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse::from(&state.config))
}

async fn render(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, ApiError> {
    if !state.limiter.admit(peer.ip()).await {
        warn!(client = %peer.ip(), "rate limit exceeded");
        return Err(ApiError::RateLimited {
            retry_after: state.limiter.retry_after(),
        });
    }

    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge {
                limit: state.config.gateway.max_content_length,
            }
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    })?;

    let html = state.renderer.render(&request.message);
    debug!(client = %peer.ip(), bytes = request.message.len(), "rendered message");

    Ok(Json(RenderResponse {
        success: true,
        html,
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
