//! HTTP gateway server built on axum.

use super::GatewayConfig;
use crate::aspect::parse_aspects;
use crate::context::RequestContext;
use crate::corpus::SentenceScoreProvider;
use crate::engine::Comparison;
use crate::error::VersusError;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Immutable per-server state shared by all handlers.
pub struct GatewayState {
    pub engine: Comparison,
    pub provider: Arc<dyn SentenceScoreProvider>,
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Thread-safe shared state for axum handlers.
pub type SharedState = Arc<GatewayState>;

/// Build the gateway router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(cam_handler))
        .route("/cam", get(cam_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error body returned to clients.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<VersusError> for ApiError {
    fn from(err: VersusError) -> Self {
        let status = match err {
            VersusError::Contract(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Compare `objectA` and `objectB` with optional `aspectN`/`weightN` pairs.
async fn cam_handler(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut ctx = RequestContext::new();
    let request_id = ctx.id;

    let outcome = async {
        let object_a = required(&params, "objectA")?;
        let object_b = required(&params, "objectB")?;
        if let Some(model) = params.get("model") {
            if model != "default" {
                return Err(ApiError::bad_request(format!(
                    "model '{model}' is not supported, only 'default'"
                )));
            }
        }
        let aspects = parse_aspects(&params).map_err(VersusError::from)?;

        tracing::info!(%request_id, %object_a, %object_b, aspects = aspects.len(), "compare request");
        let result = tokio::task::spawn_blocking(move || {
            state
                .engine
                .compare(&mut ctx, state.provider.as_ref(), &object_a, &object_b, &aspects)
        })
        .await
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("comparison task failed: {e}"),
        })??;
        Ok::<_, ApiError>(result)
    }
    .await;

    let mut response = match outcome {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            tracing::warn!(%request_id, status = %err.status, error = %err.message, "compare failed");
            err.into_response()
        }
    };
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

fn required(params: &HashMap<String, String>, key: &str) -> Result<String, ApiError> {
    params
        .get(key)
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("missing query parameter '{key}'")))
}

/// Start the gateway on the configured address.
///
/// Runs until the process receives Ctrl-C.
pub async fn run(config: &GatewayConfig, state: SharedState) -> Result<(), std::io::Error> {
    let app = router(state);
    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
