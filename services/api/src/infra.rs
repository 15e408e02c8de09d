use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use parkview::email::{
    BrevoEmailGateway, DeliveryReceipt, EmailError, EmailGateway, OutboundEmail,
};
use parkview::listings::{Apartment, ApartmentId, ListingRepository, ListingStoreError};
use parkview::sessions::{SessionGateway, UserSession};
use parkview::workflows::applications::{
    ApplicationRepository, ApplicationRepositoryError, RentalApplicationRecord,
};
use parkview::workflows::fees::{
    ApplicationFeeRecord, FeeRepository, FeeRepositoryError, FeeStatus,
};
use parkview::workflows::viewings::{ViewingRecord, ViewingRepository, ViewingRepositoryError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryFeeRepository {
    records: Arc<Mutex<Vec<ApplicationFeeRecord>>>,
}

impl InMemoryFeeRepository {
    pub(crate) fn records(&self) -> Vec<ApplicationFeeRecord> {
        self.records.lock().expect("fee mutex poisoned").clone()
    }

    /// Stand-in for the out-of-band admin review marking a fee verified.
    pub(crate) fn set_status(&self, transaction_id: &str, status: FeeStatus) {
        let mut guard = self.records.lock().expect("fee mutex poisoned");
        for record in guard.iter_mut() {
            if record.transaction_id.0 == transaction_id {
                record.status = status;
            }
        }
    }
}

impl FeeRepository for InMemoryFeeRepository {
    fn insert(
        &self,
        record: ApplicationFeeRecord,
    ) -> Result<ApplicationFeeRecord, FeeRepositoryError> {
        let mut guard = self.records.lock().expect("fee mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.transaction_id == record.transaction_id)
        {
            return Err(FeeRepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn latest_verified(
        &self,
        apartment_id: &ApartmentId,
        email: &str,
    ) -> Result<Option<ApplicationFeeRecord>, FeeRepositoryError> {
        let guard = self.records.lock().expect("fee mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .find(|record| {
                record.status == FeeStatus::Verified
                    && &record.apartment_id == apartment_id
                    && record.applicant.email == email
            })
            .cloned())
    }

    fn latest_for_applicant(
        &self,
        apartment_id: &ApartmentId,
        email: &str,
    ) -> Result<Option<ApplicationFeeRecord>, FeeRepositoryError> {
        let guard = self.records.lock().expect("fee mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .find(|record| &record.apartment_id == apartment_id && record.applicant.email == email)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<RentalApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    pub(crate) fn records(&self) -> Vec<RentalApplicationRecord> {
        self.records
            .lock()
            .expect("application mutex poisoned")
            .clone()
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(
        &self,
        record: RentalApplicationRecord,
    ) -> Result<RentalApplicationRecord, ApplicationRepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.tracking_number == record.tracking_number)
        {
            return Err(ApplicationRepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn find_by_tracking(
        &self,
        tracking_number: &str,
    ) -> Result<Option<RentalApplicationRecord>, ApplicationRepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| record.tracking_number.0 == tracking_number)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryViewingRepository {
    records: Arc<Mutex<Vec<ViewingRecord>>>,
}

impl InMemoryViewingRepository {
    pub(crate) fn records(&self) -> Vec<ViewingRecord> {
        self.records.lock().expect("viewing mutex poisoned").clone()
    }
}

impl ViewingRepository for InMemoryViewingRepository {
    fn insert(&self, record: ViewingRecord) -> Result<ViewingRecord, ViewingRepositoryError> {
        self.records
            .lock()
            .expect("viewing mutex poisoned")
            .push(record.clone());
        Ok(record)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    apartments: Arc<Mutex<HashMap<ApartmentId, Apartment>>>,
}

impl InMemoryListingRepository {
    pub(crate) fn with(apartments: Vec<Apartment>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.apartments.lock().expect("listing mutex poisoned");
            for apartment in apartments {
                guard.insert(apartment.id.clone(), apartment);
            }
        }
        store
    }
}

impl ListingRepository for InMemoryListingRepository {
    fn get(&self, id: &ApartmentId) -> Result<Option<Apartment>, ListingStoreError> {
        let guard = self.apartments.lock().expect("listing mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Apartment>, ListingStoreError> {
        let guard = self.apartments.lock().expect("listing mutex poisoned");
        let mut apartments: Vec<Apartment> = guard.values().cloned().collect();
        apartments.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(apartments)
    }
}

/// Demo inventory used when no listing export is supplied.
pub(crate) fn seed_listings() -> Vec<Apartment> {
    vec![
        Apartment {
            id: ApartmentId("apt-101".to_string()),
            title: "Sunset Loft".to_string(),
            address: "101 W Grand Ave".to_string(),
            bedrooms: 2,
            bathrooms: 1.5,
            square_feet: 940,
            rent: 1450,
            deposit: 1450,
            application_fee: None,
            amenities: vec![
                "In-unit laundry".to_string(),
                "Rooftop deck".to_string(),
            ],
            image_urls: Vec::new(),
            available_on: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
        },
        Apartment {
            id: ApartmentId("apt-202".to_string()),
            title: "Court Flat".to_string(),
            address: "18 E Court Ave".to_string(),
            bedrooms: 1,
            bathrooms: 1.0,
            square_feet: 610,
            rent: 980,
            deposit: 980,
            application_fee: Some(120),
            amenities: vec!["Covered parking".to_string()],
            image_urls: Vec::new(),
            available_on: NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date"),
        },
    ]
}

/// Email delivery selected at startup: the Brevo provider when a key is
/// configured, otherwise a log-only stand-in.
pub(crate) enum OutboundMailer {
    Brevo(BrevoEmailGateway),
    LogOnly,
}

impl EmailGateway for OutboundMailer {
    fn send(&self, message: &OutboundEmail) -> Result<DeliveryReceipt, EmailError> {
        match self {
            OutboundMailer::Brevo(gateway) => gateway.send(message),
            OutboundMailer::LogOnly => {
                info!(
                    to = %message.to,
                    subject = %message.subject,
                    "no email provider configured; message logged instead of sent"
                );
                Ok(DeliveryReceipt {
                    message_id: "log-only".to_string(),
                })
            }
        }
    }
}

/// Session lookup stub. The hosted auth provider is not wired into local
/// runs, so every visitor is anonymous unless an override is configured.
#[derive(Default, Clone)]
pub(crate) struct StaticSessionGateway {
    session: Option<UserSession>,
}

impl StaticSessionGateway {
    pub(crate) fn signed_in(email: String) -> Self {
        Self {
            session: Some(UserSession {
                email,
                display_name: None,
            }),
        }
    }
}

impl SessionGateway for StaticSessionGateway {
    fn current_session(&self) -> Option<UserSession> {
        self.session.clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
