use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryFeeRepository, InMemoryListingRepository,
    InMemoryViewingRepository, OutboundMailer, StaticSessionGateway,
};
use parkview::listings::ListingRepository;
use parkview::workflows::applications::{application_router, ApplicationService};
use parkview::workflows::fees::{fee_router, FeeRouterState, FeeService};
use parkview::workflows::viewings::{viewing_router, ViewingService};

pub(crate) type ApiFeeService =
    FeeService<InMemoryFeeRepository, InMemoryListingRepository, OutboundMailer>;
pub(crate) type ApiApplicationService =
    ApplicationService<InMemoryApplicationRepository, InMemoryListingRepository, OutboundMailer>;
pub(crate) type ApiViewingService = ViewingService<
    InMemoryViewingRepository,
    InMemoryFeeRepository,
    InMemoryListingRepository,
    OutboundMailer,
>;

/// Everything the HTTP surface needs, wired once at startup.
pub(crate) struct ApiServices {
    pub(crate) fees: Arc<ApiFeeService>,
    pub(crate) applications: Arc<ApiApplicationService>,
    pub(crate) viewings: Arc<ApiViewingService>,
    pub(crate) sessions: Arc<StaticSessionGateway>,
    pub(crate) listings: Arc<InMemoryListingRepository>,
}

pub(crate) fn with_workflow_routes(services: ApiServices) -> axum::Router {
    fee_router(FeeRouterState {
        service: services.fees,
        sessions: services.sessions,
    })
    .merge(application_router(services.applications))
    .merge(viewing_router(services.viewings))
    .merge(
        axum::Router::new()
            .route("/api/v1/apartments", axum::routing::get(apartments_endpoint))
            .with_state(services.listings),
    )
    .route("/health", axum::routing::get(healthcheck))
    .route("/ready", axum::routing::get(readiness_endpoint))
    .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn apartments_endpoint(
    State(listings): State<Arc<InMemoryListingRepository>>,
) -> impl IntoResponse {
    match listings.list() {
        Ok(apartments) => (StatusCode::OK, Json(json!({ "apartments": apartments }))),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        ),
    }
}
