use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::infra::{
    parse_date, seed_listings, InMemoryApplicationRepository, InMemoryFeeRepository,
    InMemoryListingRepository, InMemoryViewingRepository, StaticSessionGateway,
};
use parkview::email::{DeliveryReceipt, EmailError, EmailGateway, OutboundEmail};
use parkview::error::AppError;
use parkview::listings::parse_listings;
use parkview::sessions::SessionGateway;
use parkview::workflows::applications::{
    ApplicationService, ApplicationSettings, RentalApplicationSubmission,
};
use parkview::workflows::fees::{
    FeeApplicant, FeeRequest, FeeService, FeeSettings, FeeStatus, PaymentMethod,
};
use parkview::workflows::viewings::{
    ViewingRequestSubmission, ViewingService, ViewingSettings, ViewingSlot,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the demo date (YYYY-MM-DD, defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Listing export CSV to use instead of the built-in demo inventory.
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
}

/// Mailer that records outbound messages so the demo can show them.
#[derive(Default, Clone)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl EmailGateway for RecordingMailer {
    fn send(&self, message: &OutboundEmail) -> Result<DeliveryReceipt, EmailError> {
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(message.clone());
        Ok(DeliveryReceipt {
            message_id: "demo".to_string(),
        })
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let apartments = match &args.listings_csv {
        Some(path) => parse_listings(File::open(path)?)?,
        None => seed_listings(),
    };

    println!("Parkview leasing demo ({today})");
    println!("\nInventory:");
    for apartment in &apartments {
        let fee = apartment.fee_due(85);
        println!(
            "  {} — {} | ${}/mo | application fee ${}",
            apartment.id.0, apartment.title, apartment.rent, fee
        );
    }
    let first = apartments
        .first()
        .cloned()
        .ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "no listings available",
            ))
        })?;

    let listings = Arc::new(InMemoryListingRepository::with(apartments));
    let fee_repository = Arc::new(InMemoryFeeRepository::default());
    let mailer = Arc::new(RecordingMailer::default());

    let fee_service = FeeService::new(
        fee_repository.clone(),
        listings.clone(),
        mailer.clone(),
        FeeSettings {
            default_amount: 85,
            admin_address: "leasing@parkview.example".to_string(),
            sender_label: "Parkview Apartments".to_string(),
        },
    );
    let application_service = ApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        listings.clone(),
        mailer.clone(),
        ApplicationSettings {
            sender_label: "Parkview Apartments".to_string(),
            base_url: "https://parkview.example".to_string(),
        },
    );
    let viewing_repository = Arc::new(InMemoryViewingRepository::default());
    let viewing_service = ViewingService::new(
        viewing_repository.clone(),
        fee_repository.clone(),
        listings,
        mailer.clone(),
        ViewingSettings {
            admin_address: "leasing@parkview.example".to_string(),
            sender_label: "Parkview Apartments".to_string(),
        },
    );

    let sessions = StaticSessionGateway::signed_in("jane@x.com".to_string());
    let prefill = fee_service.prefill(sessions.current_session().as_ref());
    println!(
        "\nPayment form prefill for the signed-in visitor: email = {}",
        prefill.email.as_deref().unwrap_or("(none)")
    );

    let receipt = fee_service
        .request(
            FeeRequest {
                apartment_id: first.id.clone(),
                applicant: FeeApplicant {
                    full_name: "Jane Doe".to_string(),
                    email: "jane@x.com".to_string(),
                    phone: Some("515-555-0188".to_string()),
                },
                payment_method: PaymentMethod::Zelle,
            },
            today,
        )
        .map_err(AppError::workflow)?;
    println!(
        "\nFee request created: {} (${}, {})",
        receipt.transaction_id.0,
        receipt.amount,
        receipt.payment_method.label()
    );
    println!(
        "Gate before verification: {}",
        fee_service.gate(&first.id, "jane@x.com").label()
    );

    // Simulate the admin reviewing the payment proof out-of-band.
    fee_repository.set_status(&receipt.transaction_id.0, FeeStatus::Verified);
    println!(
        "Gate after verification:  {}",
        fee_service.gate(&first.id, "jane@x.com").label()
    );

    let scheduled = viewing_service
        .schedule(
            ViewingRequestSubmission {
                apartment_id: first.id.clone(),
                full_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                phone: "515-555-0188".to_string(),
                preferred_date: Some(today + chrono::Duration::days(3)),
                slot: ViewingSlot::TenAm,
                message: Some("Looking forward to the tour.".to_string()),
            },
            today,
        )
        .map_err(AppError::workflow)?;
    println!(
        "\nViewing scheduled: {} on {} at {}",
        scheduled.apartment_title,
        scheduled.preferred_date,
        scheduled.slot.label()
    );

    let submitted = application_service
        .submit(
            RentalApplicationSubmission {
                apartment_id: first.id.clone(),
                full_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                phone: "515-555-0188".to_string(),
                employment_status: "Employed full-time".to_string(),
                employer: Some("Prairie Analytics".to_string()),
                monthly_income: Some(5200),
                move_in_date: Some(first.available_on),
                occupants: Some(1),
                pets: None,
                additional_info: None,
            },
            today,
        )
        .map_err(AppError::workflow)?;
    println!(
        "Application submitted: {} ({})",
        submitted.tracking_number.0,
        submitted.status.label()
    );

    println!("\nOutbound email ({} messages):", mailer.sent().len());
    for message in mailer.sent() {
        println!("  -> {} | {}", message.to, message.subject);
    }

    Ok(())
}
