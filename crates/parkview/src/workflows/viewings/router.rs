use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{ViewingRequestSubmission, ViewingSlot};
use super::repository::ViewingRepository;
use super::service::{ViewingService, ViewingServiceError};
use crate::email::EmailGateway;
use crate::listings::ListingRepository;
use crate::workflows::fees::FeeRepository;

/// Router builder exposing slot listing and viewing scheduling.
pub fn viewing_router<R, F, L, G>(service: Arc<ViewingService<R, F, L, G>>) -> Router
where
    R: ViewingRepository + 'static,
    F: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    Router::new()
        .route("/api/v1/viewings", post(schedule_handler::<R, F, L, G>))
        .route("/api/v1/viewings/slots", get(slots_handler))
        .with_state(service)
}

pub(crate) async fn schedule_handler<R, F, L, G>(
    State(service): State<Arc<ViewingService<R, F, L, G>>>,
    axum::Json(submission): axum::Json<ViewingRequestSubmission>,
) -> Response
where
    R: ViewingRepository + 'static,
    F: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    let today = Local::now().date_naive();
    let result = tokio::task::spawn_blocking(move || service.schedule(submission, today)).await;

    match result {
        Ok(Ok(scheduled)) => (StatusCode::CREATED, axum::Json(scheduled)).into_response(),
        Ok(Err(error)) => viewing_error_response(error),
        Err(join_error) => {
            let payload = json!({ "error": format!("scheduling task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// The fixed slot set the scheduling form offers.
pub(crate) async fn slots_handler() -> Response {
    let slots: Vec<_> = ViewingSlot::ordered()
        .into_iter()
        .map(|slot| {
            json!({
                "slot": slot,
                "label": slot.label(),
            })
        })
        .collect();
    (StatusCode::OK, axum::Json(json!({ "slots": slots }))).into_response()
}

fn viewing_error_response(error: ViewingServiceError) -> Response {
    let status = match &error {
        ViewingServiceError::Busy(_) => StatusCode::CONFLICT,
        ViewingServiceError::MissingFullName
        | ViewingServiceError::MissingEmail
        | ViewingServiceError::MissingPhone
        | ViewingServiceError::MissingPreferredDate
        | ViewingServiceError::DateInPast(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ViewingServiceError::FeeNotVerified => StatusCode::PAYMENT_REQUIRED,
        ViewingServiceError::UnknownApartment(_) => StatusCode::NOT_FOUND,
        ViewingServiceError::Listing(_) | ViewingServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
