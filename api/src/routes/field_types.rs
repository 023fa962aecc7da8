//! Field type registry endpoint

use axum::Json;
use formdesk_core::catalog;

use crate::models::*;

/// List the field types the form editor can offer
#[utoipa::path(
    get,
    path = "/api/field-types",
    responses(
        (status = 200, description = "Field type registry", body = ApiResponse<Vec<FieldTypeInfo>>)
    ),
    tag = "forms"
)]
pub async fn list_field_types() -> Json<ApiResponse<Vec<FieldTypeInfo>>> {
    Json(ApiResponse::success(
        catalog().into_iter().map(FieldTypeInfo::from).collect(),
    ))
}
