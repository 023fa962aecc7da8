//! FormDesk REST API
//!
//! HTTP surface over the form builder use cases.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          REST API                             │
//! │   /api/forms   /api/responses   /api/field-types   /docs      │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │ Arc<dyn FormUseCases / ResponseUseCases>
//! ┌───────────────────────────────▼───────────────────────────────┐
//! │               FormService        ResponseService              │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │ Arc<dyn FormRepository / ResponseRepository>
//! ┌───────────────────────────────▼───────────────────────────────┐
//! │                    document store adapter                     │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use formdesk_core::infrastructure::{
    InMemoryFormRepository, InMemoryResponseRepository, LoggingEventPublisher,
};
use formdesk_core::{
    EventPublisher, FormRepository, FormService, FormUseCases, ResponseRepository,
    ResponseService, ResponseUseCases,
};

pub use config::ApiConfig;
pub use error::ApiError;
pub use models::*;

/// API state
#[derive(Clone)]
pub struct ApiState {
    pub forms: Arc<dyn FormUseCases>,
    pub responses: Arc<dyn ResponseUseCases>,
}

impl ApiState {
    /// Wire the services over the given stores
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            forms: Arc::new(FormService::new(forms.clone(), responses.clone(), events.clone())),
            responses: Arc::new(ResponseService::new(forms, responses, events)),
        }
    }

    /// Services over in-memory stores with events written to the log
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryFormRepository::new()),
            Arc::new(InMemoryResponseRepository::new()),
            Arc::new(LoggingEventPublisher),
        )
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FormDesk API",
        version = "0.1.0",
        description = "Form builder: schemas, submissions and response review",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::field_types::list_field_types,
        routes::stats::get_stats,
        routes::forms::list_forms,
        routes::forms::create_form,
        routes::forms::get_form,
        routes::forms::update_form,
        routes::forms::delete_form,
        routes::forms::duplicate_form,
        routes::forms::validate_submission,
        routes::forms::submit_response,
        routes::forms::list_form_responses,
        routes::forms::export_responses,
        routes::responses::list_responses,
        routes::responses::get_response,
        routes::responses::delete_response,
    ),
    components(
        schemas(
            ErrorResponse, Created,
            FieldTypeInfo, Field, Form, FormListItem, FieldCreate, FormCreate,
            FormDeleted, Stats, SubmissionCreate, ValidationReport, Answer, Response,
            routes::health::HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forms", description = "Form management"),
        (name = "responses", description = "Submissions and response review")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState, config: &ApiConfig) -> Router {
    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/field-types", get(routes::field_types::list_field_types))
        .route("/stats", get(routes::stats::get_stats))
        .merge(routes::forms::router())
        .merge(routes::responses::router())
}
