//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::ApiError, models::*, ApiState};

/// Form and response counters
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = ApiResponse<Stats>)
    ),
    tag = "forms"
)]
pub async fn get_stats(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<Stats>>, ApiError> {
    let stats = state.forms.stats().await?;
    Ok(Json(ApiResponse::success(stats.into())))
}
