//! Creditmeter API Gateway
//!
//! - `GET /usage`: credits consumed by each message of the current period
//! - `GET /health`: liveness
//! - `GET /metrics`: prometheus exposition

pub mod config;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use creditmeter_billing::{
    sources::build_client, usage_aggregator, BillingCaches, BillingMetrics, HttpMessageSource,
    HttpReportSource, UsageAggregator,
};
use creditmeter_common::{CreditError, Result, UsageResponse};
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::GatewayConfig;

// ============ STATE ============

#[derive(Clone)]
pub struct AppState {
    aggregator: UsageAggregator,
    registry: Arc<Registry>,
}

impl AppState {
    pub fn new(aggregator: UsageAggregator, registry: Arc<Registry>) -> Self {
        Self {
            aggregator,
            registry,
        }
    }
}

// ============ ERRORS ============

/// Maps every fatal error to `500 {"detail": ...}`
#[derive(Debug)]
pub struct ApiError(pub CreditError);

impl From<CreditError> for ApiError {
    fn from(err: CreditError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

// ============ HANDLERS ============

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn get_usage(
    State(state): State<AppState>,
) -> std::result::Result<Json<UsageResponse>, ApiError> {
    let response = state.aggregator.compute_usage().await?;
    Ok(Json(response))
}

async fn get_metrics(State(state): State<AppState>) -> std::result::Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&state.registry.gather(), &mut buffer)
        .map_err(|e| CreditError::Internal(format!("Failed to encode metrics: {}", e)))?;

    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response())
}

// ============ ROUTER ============

/// CORS for the configured allow-list; `*` allows any origin without credentials
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|_| CreditError::Config(format!("Invalid CORS origin: {}", o)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/usage", get(get_usage))
        .route("/metrics", get(get_metrics))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Build the full application against the configured upstream services
pub fn app(config: &GatewayConfig) -> Result<Router> {
    let client = build_client(Duration::from_secs(config.http_timeout_secs))?;
    let messages = Arc::new(HttpMessageSource::new(client.clone(), &config.messages_url));
    let reports = Arc::new(HttpReportSource::new(client, &config.report_url_template));

    let registry = Arc::new(Registry::new());
    let metrics = Arc::new(BillingMetrics::new());
    metrics
        .register(&registry)
        .map_err(|e| CreditError::Internal(format!("Failed to register metrics: {}", e)))?;

    let aggregator = usage_aggregator(messages, reports, &BillingCaches::new(), Some(metrics));
    let state = AppState::new(aggregator, registry);

    Ok(router(state, cors_layer(&config.cors_origins)?))
}
