use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::TimelineError;
use crate::models::TransactionSummary;
use crate::timeline::{self, GroupedBucket, TimelineItem};
use crate::timeline_stats::{TimelineSnapshot, TIMELINE_STATS};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub struct ApiError(TimelineError);

impl From<TimelineError> for ApiError {
    fn from(err: TimelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("rejecting page: {}", self.0);
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct BatchParams {
    nonce: u64,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct BatchResponse {
    nonce: u64,
    transactions: Vec<TransactionSummary>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn stats() -> Json<TimelineSnapshot> {
    Json(TIMELINE_STATS.snapshot())
}

async fn history(
    State(state): State<AppState>,
    Json(page): Json<Value>,
) -> Result<Json<Vec<GroupedBucket>>, ApiError> {
    let page = timeline::page_from_value(page)?;
    Ok(Json(timeline::history_timeline(
        &page.results,
        &state.config.utc_offset,
    )))
}

async fn queue(Json(page): Json<Value>) -> Result<Json<Vec<TimelineItem>>, ApiError> {
    let page = timeline::page_from_value(page)?;
    Ok(Json(timeline::queue_timeline(&page.results)))
}

async fn batch(
    State(state): State<AppState>,
    Query(params): Query<BatchParams>,
    Json(page): Json<Value>,
) -> Result<Json<BatchResponse>, ApiError> {
    let page = timeline::page_from_value(page)?;
    let limit = params.limit.unwrap_or(state.config.batch_limit);
    let transactions = timeline::batchable_from_queue(&page.results, params.nonce, limit);
    Ok(Json(BatchResponse {
        nonce: params.nonce,
        transactions,
    }))
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/timeline/history", post(history))
        .route("/timeline/queue", post(queue))
        .route("/timeline/batch", post(batch))
        .with_state(state)
}

pub async fn run_http_server(addr: &str, state: AppState) -> Result<()> {
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
