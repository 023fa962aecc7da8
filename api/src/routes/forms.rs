//! Form management and submission endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use formdesk_core::application::dto::FormFilter;
use formdesk_core::{EntityId, FormStatus};

use crate::{error::ApiError, models::*, ApiState};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/forms", get(list_forms).post(create_form))
        .route("/forms/:id", get(get_form).put(update_form).delete(delete_form))
        .route("/forms/:id/duplicate", post(duplicate_form))
        .route("/forms/:id/validate", post(validate_submission))
        .route("/forms/:id/submit", post(submit_response))
        .route("/forms/:id/responses", get(list_form_responses))
        .route("/forms/:id/responses/export", get(export_responses))
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ListParams {
    search: Option<String>,
    category: Option<String>,
    status: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> Result<FormFilter, ApiError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.parse::<FormStatus>().map_err(ApiError::BadRequest)?),
        };
        Ok(FormFilter {
            search: self.search,
            category: self.category,
            status,
        })
    }
}

/// List forms, newest first
#[utoipa::path(
    get,
    path = "/api/forms",
    params(
        ("search" = Option<String>, Query, description = "Substring of the form name"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "List of forms", body = ApiResponse<Vec<FormListItem>>),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "forms"
)]
pub async fn list_forms(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<FormListItem>>>, ApiError> {
    let filter = params.into_filter()?;
    let forms = state.forms.list_forms(&filter).await?;
    Ok(Json(ApiResponse::success(
        forms.into_iter().map(FormListItem::from).collect(),
    )))
}

/// Create a form
#[utoipa::path(
    post,
    path = "/api/forms",
    request_body = FormCreate,
    responses(
        (status = 201, description = "Form created", body = ApiResponse<Created>),
        (status = 400, description = "Invalid form")
    ),
    tag = "forms"
)]
pub async fn create_form(
    State(state): State<Arc<ApiState>>,
    Json(input): Json<FormCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Created>>), ApiError> {
    let id = state.forms.create_form(input.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(Created { id }))))
}

/// Get form by ID
#[utoipa::path(
    get,
    path = "/api/forms/{id}",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Form with fields", body = ApiResponse<Form>),
        (status = 404, description = "Form not found")
    ),
    tag = "forms"
)]
pub async fn get_form(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Form>>, ApiError> {
    let form = state.forms.get_form(&EntityId::from_string(id)).await?;
    Ok(Json(ApiResponse::success(Form::from(&form))))
}

/// Replace a form's details and fields
#[utoipa::path(
    put,
    path = "/api/forms/{id}",
    params(("id" = String, Path, description = "Form ID")),
    request_body = FormCreate,
    responses(
        (status = 200, description = "Form updated", body = ApiResponse<Form>),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Form not found")
    ),
    tag = "forms"
)]
pub async fn update_form(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(input): Json<FormCreate>,
) -> Result<Json<ApiResponse<Form>>, ApiError> {
    let form = state
        .forms
        .update_form(&EntityId::from_string(id), input.into())
        .await?;
    Ok(Json(ApiResponse::success(Form::from(&form))))
}

/// Delete a form and its responses
#[utoipa::path(
    delete,
    path = "/api/forms/{id}",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Form deleted", body = ApiResponse<FormDeleted>),
        (status = 404, description = "Form not found")
    ),
    tag = "forms"
)]
pub async fn delete_form(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FormDeleted>>, ApiError> {
    let responses_removed = state.forms.delete_form(&EntityId::from_string(id)).await?;
    Ok(Json(ApiResponse::success(FormDeleted { responses_removed })))
}

/// Copy a form under a new ID
#[utoipa::path(
    post,
    path = "/api/forms/{id}/duplicate",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 201, description = "Copy created", body = ApiResponse<Created>),
        (status = 404, description = "Form not found")
    ),
    tag = "forms"
)]
pub async fn duplicate_form(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<Created>>), ApiError> {
    let id = state.forms.duplicate_form(&EntityId::from_string(id)).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(Created { id }))))
}

/// Check answers without recording them
#[utoipa::path(
    post,
    path = "/api/forms/{id}/validate",
    params(("id" = String, Path, description = "Form ID")),
    request_body = SubmissionCreate,
    responses(
        (status = 200, description = "Progress and field errors", body = ApiResponse<ValidationReport>),
        (status = 404, description = "Form not found")
    ),
    tag = "responses"
)]
pub async fn validate_submission(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(input): Json<SubmissionCreate>,
) -> Result<Json<ApiResponse<ValidationReport>>, ApiError> {
    let preview = state
        .responses
        .preview_submission(&EntityId::from_string(id), &input.values)
        .await?;
    Ok(Json(ApiResponse::success(preview.into())))
}

/// Submit answers to a form
#[utoipa::path(
    post,
    path = "/api/forms/{id}/submit",
    params(("id" = String, Path, description = "Form ID")),
    request_body = SubmissionCreate,
    responses(
        (status = 201, description = "Response recorded", body = ApiResponse<Created>),
        (status = 404, description = "Form not found"),
        (status = 422, description = "Required fields missing or malformed values")
    ),
    tag = "responses"
)]
pub async fn submit_response(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(input): Json<SubmissionCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Created>>), ApiError> {
    let id = state
        .responses
        .submit_response(&EntityId::from_string(id), input.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(Created { id }))))
}

/// Responses of one form, newest first
#[utoipa::path(
    get,
    path = "/api/forms/{id}/responses",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Responses", body = ApiResponse<Vec<Response>>)
    ),
    tag = "responses"
)]
pub async fn list_form_responses(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Response>>>, ApiError> {
    let responses = state.responses.list_responses(&EntityId::from_string(id)).await?;
    Ok(Json(ApiResponse::success(
        responses.iter().map(Response::from).collect(),
    )))
}

/// Download a form's responses as CSV
#[utoipa::path(
    get,
    path = "/api/forms/{id}/responses/export",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 200, description = "CSV file", body = String, content_type = "text/csv"),
        (status = 404, description = "Form not found")
    ),
    tag = "responses"
)]
pub async fn export_responses(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let export = state.responses.export_csv(&EntityId::from_string(id)).await?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];
    Ok((headers, export.content))
}
