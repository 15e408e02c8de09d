use std::fs::File;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryFeeRepository, InMemoryListingRepository,
    InMemoryViewingRepository, OutboundMailer, StaticSessionGateway,
};
use crate::routes::{with_workflow_routes, ApiServices};
use parkview::config::AppConfig;
use parkview::email::BrevoEmailGateway;
use parkview::error::AppError;
use parkview::listings::{parse_listings, Apartment};
use parkview::telemetry;
use parkview::workflows::applications::{ApplicationService, ApplicationSettings};
use parkview::workflows::fees::{FeeService, FeeSettings};
use parkview::workflows::viewings::{ViewingService, ViewingSettings};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let apartments = load_inventory(&args)?;
    let listings = Arc::new(InMemoryListingRepository::with(apartments));

    let mailer = Arc::new(match config.email.brevo_api_key.clone() {
        Some(api_key) => OutboundMailer::Brevo(BrevoEmailGateway::new(
            api_key,
            config.email.sender_address.clone(),
        )),
        None => OutboundMailer::LogOnly,
    });

    let fee_repository = Arc::new(InMemoryFeeRepository::default());
    let services = ApiServices {
        fees: Arc::new(FeeService::new(
            fee_repository.clone(),
            listings.clone(),
            mailer.clone(),
            FeeSettings {
                default_amount: config.site.default_application_fee,
                admin_address: config.email.admin_address.clone(),
                sender_label: config.email.sender_label.clone(),
            },
        )),
        applications: Arc::new(ApplicationService::new(
            Arc::new(InMemoryApplicationRepository::default()),
            listings.clone(),
            mailer.clone(),
            ApplicationSettings {
                sender_label: config.email.sender_label.clone(),
                base_url: config.site.base_url.clone(),
            },
        )),
        viewings: Arc::new(ViewingService::new(
            Arc::new(InMemoryViewingRepository::default()),
            fee_repository,
            listings.clone(),
            mailer,
            ViewingSettings {
                admin_address: config.email.admin_address.clone(),
                sender_label: config.email.sender_label.clone(),
            },
        )),
        sessions: Arc::new(StaticSessionGateway::default()),
        listings,
    };

    let app = with_workflow_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "leasing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_inventory(args: &ServeArgs) -> Result<Vec<Apartment>, AppError> {
    match &args.listings_csv {
        Some(path) => {
            let file = File::open(path)?;
            Ok(parse_listings(file)?)
        }
        None => Ok(crate::infra::seed_listings()),
    }
}
