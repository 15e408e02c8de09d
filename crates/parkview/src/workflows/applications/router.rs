use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::RentalApplicationSubmission;
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};
use crate::email::EmailGateway;
use crate::listings::ListingRepository;

/// Router builder exposing application intake and tracking lookup.
pub fn application_router<R, L, G>(service: Arc<ApplicationService<R, L, G>>) -> Router
where
    R: ApplicationRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R, L, G>))
        .route(
            "/api/v1/applications/track",
            get(track_handler::<R, L, G>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, L, G>(
    State(service): State<Arc<ApplicationService<R, L, G>>>,
    axum::Json(submission): axum::Json<RentalApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    let today = Local::now().date_naive();
    let result = tokio::task::spawn_blocking(move || service.submit(submission, today)).await;

    match result {
        Ok(Ok(submitted)) => (StatusCode::CREATED, axum::Json(submitted)).into_response(),
        Ok(Err(error)) => application_error_response(error),
        Err(join_error) => {
            let payload = json!({ "error": format!("submission task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackQuery {
    pub(crate) code: String,
}

pub(crate) async fn track_handler<R, L, G>(
    State(service): State<Arc<ApplicationService<R, L, G>>>,
    Query(query): Query<TrackQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    let result = tokio::task::spawn_blocking(move || service.track(&query.code)).await;

    match result {
        Ok(Ok(Some(view))) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(Ok(None)) => {
            let payload = json!({ "error": "unknown tracking code" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Ok(Err(error)) => application_error_response(error),
        Err(join_error) => {
            let payload = json!({ "error": format!("lookup task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn application_error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::Busy(_) => StatusCode::CONFLICT,
        ApplicationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::UnknownApartment(_) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Notification(_) => StatusCode::BAD_GATEWAY,
        ApplicationServiceError::Listing(_) | ApplicationServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
