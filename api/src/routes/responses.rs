//! Response review endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use formdesk_core::EntityId;

use crate::{error::ApiError, models::*, ApiState};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/responses", get(list_responses))
        .route("/responses/:id", get(get_response).delete(delete_response))
}

/// Every response across all forms, newest first
#[utoipa::path(
    get,
    path = "/api/responses",
    responses(
        (status = 200, description = "Responses", body = ApiResponse<Vec<Response>>)
    ),
    tag = "responses"
)]
pub async fn list_responses(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<Vec<Response>>>, ApiError> {
    let responses = state.responses.list_all_responses().await?;
    Ok(Json(ApiResponse::success(
        responses.iter().map(Response::from).collect(),
    )))
}

/// Get response by ID
#[utoipa::path(
    get,
    path = "/api/responses/{id}",
    params(("id" = String, Path, description = "Response ID")),
    responses(
        (status = 200, description = "Response details", body = ApiResponse<Response>),
        (status = 404, description = "Response not found")
    ),
    tag = "responses"
)]
pub async fn get_response(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Response>>, ApiError> {
    let record = state.responses.get_response(&EntityId::from_string(id)).await?;
    Ok(Json(ApiResponse::success(Response::from(&record))))
}

/// Delete a response
#[utoipa::path(
    delete,
    path = "/api/responses/{id}",
    params(("id" = String, Path, description = "Response ID")),
    responses(
        (status = 200, description = "Response deleted"),
        (status = 404, description = "Response not found")
    ),
    tag = "responses"
)]
pub async fn delete_response(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.responses.delete_response(&EntityId::from_string(id)).await?;
    Ok(Json(ApiResponse::success(())))
}
