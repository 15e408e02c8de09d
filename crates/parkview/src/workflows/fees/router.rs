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

use super::domain::FeeRequest;
use super::repository::FeeRepository;
use super::service::{FeeGate, FeeService, FeeServiceError};
use crate::email::EmailGateway;
use crate::listings::{ApartmentId, ListingRepository};
use crate::sessions::SessionGateway;

/// Shared state for the fee endpoints.
pub struct FeeRouterState<R, L, G, S> {
    pub service: Arc<FeeService<R, L, G>>,
    pub sessions: Arc<S>,
}

impl<R, L, G, S> Clone for FeeRouterState<R, L, G, S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Router builder exposing the fee request, gate, and prefill endpoints.
pub fn fee_router<R, L, G, S>(state: FeeRouterState<R, L, G, S>) -> Router
where
    R: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
    S: SessionGateway + 'static,
{
    Router::new()
        .route("/api/v1/fees", post(request_handler::<R, L, G, S>))
        .route("/api/v1/fees/gate", get(gate_handler::<R, L, G, S>))
        .route("/api/v1/fees/prefill", get(prefill_handler::<R, L, G, S>))
        .with_state(state)
}

pub(crate) async fn request_handler<R, L, G, S>(
    State(state): State<FeeRouterState<R, L, G, S>>,
    axum::Json(request): axum::Json<FeeRequest>,
) -> Response
where
    R: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
    S: SessionGateway + 'static,
{
    let service = state.service.clone();
    let today = Local::now().date_naive();
    let result = tokio::task::spawn_blocking(move || service.request(request, today)).await;

    match result {
        Ok(Ok(receipt)) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Ok(Err(error)) => fee_error_response(error),
        Err(join_error) => {
            let payload = json!({ "error": format!("submission task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GateQuery {
    pub(crate) apartment_id: String,
    pub(crate) email: String,
}

pub(crate) async fn gate_handler<R, L, G, S>(
    State(state): State<FeeRouterState<R, L, G, S>>,
    Query(query): Query<GateQuery>,
) -> Response
where
    R: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
    S: SessionGateway + 'static,
{
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || {
        service.gate(&ApartmentId(query.apartment_id), &query.email)
    })
    .await;

    match result {
        Ok(gate) => {
            let transaction_id = match &gate {
                FeeGate::Verified { transaction_id }
                | FeeGate::UnderReview { transaction_id } => Some(transaction_id.0.clone()),
                FeeGate::PaymentRequired => None,
            };
            let payload = json!({
                "state": gate.label(),
                "transaction_id": transaction_id,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({ "error": format!("gate check failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn prefill_handler<R, L, G, S>(
    State(state): State<FeeRouterState<R, L, G, S>>,
) -> Response
where
    R: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
    S: SessionGateway + 'static,
{
    let session = state.sessions.current_session();
    let prefill = state.service.prefill(session.as_ref());
    (StatusCode::OK, axum::Json(prefill)).into_response()
}

fn fee_error_response(error: FeeServiceError) -> Response {
    let status = match &error {
        FeeServiceError::Busy(_) => StatusCode::CONFLICT,
        FeeServiceError::MissingFullName | FeeServiceError::MissingEmail => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FeeServiceError::UnknownApartment(_) => StatusCode::NOT_FOUND,
        FeeServiceError::Listing(_) | FeeServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
