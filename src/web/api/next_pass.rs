use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::scheduler::{PassCandidate, ScheduledPass};
use crate::timeexpr::TimeExpr;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NextPassQuery {
    /// `now`, `T+10m`, or an RFC 3339 instant. Defaults to now.
    pub start: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NextPassResponse {
    pub pass: Option<ScheduledPass>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ObjectPassResponse {
    pub pass: Option<PassCandidate>,
}

#[utoipa::path(
    get,
    path = "/api/next-pass",
    tag = "passes",
    params(
        ("start" = Option<String>, Query, description = "Search start (now, T+10m, RFC3339)")
    ),
    responses(
        (status = 200, description = "Next pass over all active objects", body = NextPassResponse),
        (status = 400, description = "Invalid start time", body = ErrorResponse)
    )
)]
pub async fn next_pass(
    State(state): State<AppState>,
    Query(query): Query<NextPassQuery>,
) -> ApiResult<Json<NextPassResponse>> {
    let start = parse_start(query.start.as_deref())?;
    let catalog = state.catalog.clone();
    let scheduler = state.scheduler.clone();

    let pass = tokio::task::spawn_blocking(move || {
        let catalog = catalog.blocking_read();
        scheduler.next_pass(&catalog, start)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(NextPassResponse { pass }))
}

#[utoipa::path(
    get,
    path = "/api/next-pass/{name}",
    tag = "passes",
    params(
        ("name" = String, Path, description = "Tracked object name"),
        ("start" = Option<String>, Query, description = "Search start (now, T+10m, RFC3339)")
    ),
    responses(
        (status = 200, description = "Next pass of the named object", body = ObjectPassResponse),
        (status = 400, description = "Invalid start time", body = ErrorResponse),
        (status = 404, description = "Unknown object", body = ErrorResponse)
    )
)]
pub async fn next_pass_for(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<NextPassQuery>,
) -> ApiResult<Json<ObjectPassResponse>> {
    let start = parse_start(query.start.as_deref())?;
    let catalog = state.catalog.clone();
    let scheduler = state.scheduler.clone();

    let pass = tokio::task::spawn_blocking(move || {
        let catalog = catalog.blocking_read();
        scheduler.next_pass_for(&catalog, &name, start)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(ObjectPassResponse { pass }))
}

fn parse_start(expr: Option<&str>) -> ApiResult<Option<DateTime<Utc>>> {
    let Some(expr) = expr else {
        return Ok(None);
    };
    let parsed: TimeExpr = expr.parse()?;
    Ok(Some(parsed.resolve(Utc::now())?))
}
