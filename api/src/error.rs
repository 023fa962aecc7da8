//! Mapping of use case errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formdesk_core::FormsError;
use thiserror::Error;

use crate::models::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Forms(#[from] FormsError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forms(err) => match err {
                FormsError::FormNotFound(_) | FormsError::ResponseNotFound(_) => StatusCode::NOT_FOUND,
                FormsError::InvalidSchema(_) => StatusCode::BAD_REQUEST,
                FormsError::IncompleteSubmission(_) | FormsError::EmptyFieldSet => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                FormsError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match &self {
            Self::BadRequest(_) => ApiResponse::<()>::error("BAD_REQUEST", &message),
            Self::Forms(err @ FormsError::IncompleteSubmission(errors)) => ApiResponse::rejected(
                err.code(),
                &message,
                errors
                    .iter()
                    .map(|(field_id, kind)| (field_id.clone(), kind.code().to_string()))
                    .collect(),
            ),
            Self::Forms(err) => {
                if status.is_server_error() {
                    tracing::error!(error = %err, "request failed");
                }
                ApiResponse::error(err.code(), &message)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesk_core::{SchemaViolation, SchemaViolations};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (FormsError::FormNotFound("x".into()), StatusCode::NOT_FOUND),
            (FormsError::ResponseNotFound("x".into()), StatusCode::NOT_FOUND),
            (
                FormsError::InvalidSchema(SchemaViolations(vec![SchemaViolation::MissingName])),
                StatusCode::BAD_REQUEST,
            ),
            (FormsError::EmptyFieldSet, StatusCode::UNPROCESSABLE_ENTITY),
            (FormsError::Persistence("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
