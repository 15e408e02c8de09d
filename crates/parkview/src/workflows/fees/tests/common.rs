use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::email::{DeliveryReceipt, EmailError, EmailGateway, OutboundEmail};
use crate::listings::{Apartment, ApartmentId, ListingRepository, ListingStoreError};
use crate::sessions::{SessionGateway, UserSession};
use crate::workflows::fees::domain::{
    ApplicationFeeRecord, FeeApplicant, FeeRequest, FeeStatus, PaymentMethod,
};
use crate::workflows::fees::repository::{FeeRepository, FeeRepositoryError};
use crate::workflows::fees::service::{FeeService, FeeSettings};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 12).expect("valid date")
}

pub(super) fn sunset_loft() -> Apartment {
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
        amenities: vec!["In-unit laundry".to_string()],
        image_urls: Vec::new(),
        available_on: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
    }
}

pub(super) fn court_flat() -> Apartment {
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
        amenities: Vec::new(),
        image_urls: Vec::new(),
        available_on: NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date"),
    }
}

pub(super) fn settings() -> FeeSettings {
    FeeSettings {
        default_amount: 85,
        admin_address: "leasing@parkview.example".to_string(),
        sender_label: "Parkview Apartments".to_string(),
    }
}

pub(super) fn fee_request() -> FeeRequest {
    FeeRequest {
        apartment_id: ApartmentId("apt-101".to_string()),
        applicant: FeeApplicant {
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: None,
        },
        payment_method: PaymentMethod::Zelle,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryFeeRepository {
    records: Arc<Mutex<Vec<ApplicationFeeRecord>>>,
}

impl MemoryFeeRepository {
    pub(super) fn records(&self) -> Vec<ApplicationFeeRecord> {
        self.records.lock().expect("fee mutex poisoned").clone()
    }

    pub(super) fn seed(&self, record: ApplicationFeeRecord) {
        self.records.lock().expect("fee mutex poisoned").push(record);
    }

    /// Simulate the out-of-band admin review flipping a record's status.
    pub(super) fn set_status(&self, transaction_id: &str, status: FeeStatus) {
        let mut guard = self.records.lock().expect("fee mutex poisoned");
        for record in guard.iter_mut() {
            if record.transaction_id.0 == transaction_id {
                record.status = status;
            }
        }
    }
}

impl FeeRepository for MemoryFeeRepository {
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

pub(super) struct UnavailableFeeRepository;

impl FeeRepository for UnavailableFeeRepository {
    fn insert(
        &self,
        _record: ApplicationFeeRecord,
    ) -> Result<ApplicationFeeRecord, FeeRepositoryError> {
        Err(FeeRepositoryError::Unavailable("store offline".to_string()))
    }

    fn latest_verified(
        &self,
        _apartment_id: &ApartmentId,
        _email: &str,
    ) -> Result<Option<ApplicationFeeRecord>, FeeRepositoryError> {
        Err(FeeRepositoryError::Unavailable("store offline".to_string()))
    }

    fn latest_for_applicant(
        &self,
        _apartment_id: &ApartmentId,
        _email: &str,
    ) -> Result<Option<ApplicationFeeRecord>, FeeRepositoryError> {
        Err(FeeRepositoryError::Unavailable("store offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryListings {
    apartments: Arc<Mutex<HashMap<ApartmentId, Apartment>>>,
}

impl MemoryListings {
    pub(super) fn with(apartments: Vec<Apartment>) -> Self {
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

impl ListingRepository for MemoryListings {
    fn get(&self, id: &ApartmentId) -> Result<Option<Apartment>, ListingStoreError> {
        let guard = self.apartments.lock().expect("listing mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Apartment>, ListingStoreError> {
        let guard = self.apartments.lock().expect("listing mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl MemoryMailer {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl EmailGateway for MemoryMailer {
    fn send(&self, message: &OutboundEmail) -> Result<DeliveryReceipt, EmailError> {
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(message.clone());
        Ok(DeliveryReceipt {
            message_id: format!("msg-{}", self.sent().len()),
        })
    }
}

pub(super) struct FailingMailer;

impl EmailGateway for FailingMailer {
    fn send(&self, _message: &OutboundEmail) -> Result<DeliveryReceipt, EmailError> {
        Err(EmailError::Transport("provider unreachable".to_string()))
    }
}

pub(super) struct StaticSessions(pub(super) Option<UserSession>);

impl SessionGateway for StaticSessions {
    fn current_session(&self) -> Option<UserSession> {
        self.0.clone()
    }
}

pub(super) fn build_service() -> (
    FeeService<MemoryFeeRepository, MemoryListings, MemoryMailer>,
    Arc<MemoryFeeRepository>,
    Arc<MemoryMailer>,
) {
    let repository = Arc::new(MemoryFeeRepository::default());
    let listings = Arc::new(MemoryListings::with(vec![sunset_loft(), court_flat()]));
    let mailer = Arc::new(MemoryMailer::default());
    let service = FeeService::new(repository.clone(), listings, mailer.clone(), settings());
    (service, repository, mailer)
}
