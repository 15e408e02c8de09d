use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::email::{DeliveryReceipt, EmailError, EmailGateway, OutboundEmail};
use crate::listings::{Apartment, ApartmentId, ListingRepository, ListingStoreError};
use crate::workflows::fees::domain::{
    ApplicationFeeRecord, FeeApplicant, FeeStatus, PaymentMethod, TransactionId,
};
use crate::workflows::fees::repository::{FeeRepository, FeeRepositoryError};
use crate::workflows::viewings::domain::{
    ViewingRecord, ViewingRequestSubmission, ViewingSlot,
};
use crate::workflows::viewings::repository::{ViewingRepository, ViewingRepositoryError};
use crate::workflows::viewings::service::{ViewingService, ViewingSettings};

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
        amenities: Vec::new(),
        image_urls: Vec::new(),
        available_on: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
    }
}

pub(super) fn settings() -> ViewingSettings {
    ViewingSettings {
        admin_address: "leasing@parkview.example".to_string(),
        sender_label: "Parkview Apartments".to_string(),
    }
}

pub(super) fn submission() -> ViewingRequestSubmission {
    ViewingRequestSubmission {
        apartment_id: ApartmentId("apt-101".to_string()),
        full_name: "Sam Okafor".to_string(),
        email: "sam@x.com".to_string(),
        phone: "515-555-0134".to_string(),
        preferred_date: NaiveDate::from_ymd_opt(2025, 5, 20),
        slot: ViewingSlot::ElevenAm,
        message: Some("Is street parking available?".to_string()),
    }
}

pub(super) fn verified_fee(apartment_id: &str, email: &str) -> ApplicationFeeRecord {
    let mut record = ApplicationFeeRecord::pending(
        TransactionId(format!("PF-00000001-{}", &email[..2].to_uppercase())),
        ApartmentId(apartment_id.to_string()),
        "Sunset Loft".to_string(),
        FeeApplicant {
            full_name: "Sam Okafor".to_string(),
            email: email.to_string(),
            phone: None,
        },
        85,
        PaymentMethod::Chime,
        today(),
    );
    record.status = FeeStatus::Verified;
    record
}

#[derive(Default, Clone)]
pub(super) struct MemoryViewingRepository {
    records: Arc<Mutex<Vec<ViewingRecord>>>,
}

impl MemoryViewingRepository {
    pub(super) fn records(&self) -> Vec<ViewingRecord> {
        self.records.lock().expect("viewing mutex poisoned").clone()
    }
}

impl ViewingRepository for MemoryViewingRepository {
    fn insert(&self, record: ViewingRecord) -> Result<ViewingRecord, ViewingRepositoryError> {
        self.records
            .lock()
            .expect("viewing mutex poisoned")
            .push(record.clone());
        Ok(record)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryFeeStore {
    records: Arc<Mutex<Vec<ApplicationFeeRecord>>>,
}

impl MemoryFeeStore {
    pub(super) fn seed(&self, record: ApplicationFeeRecord) {
        self.records.lock().expect("fee mutex poisoned").push(record);
    }
}

impl FeeRepository for MemoryFeeStore {
    fn insert(
        &self,
        record: ApplicationFeeRecord,
    ) -> Result<ApplicationFeeRecord, FeeRepositoryError> {
        self.records
            .lock()
            .expect("fee mutex poisoned")
            .push(record.clone());
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

pub(super) struct UnavailableFeeStore;

impl FeeRepository for UnavailableFeeStore {
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
            message_id: "msg-1".to_string(),
        })
    }
}

pub(super) struct FailingMailer;

impl EmailGateway for FailingMailer {
    fn send(&self, _message: &OutboundEmail) -> Result<DeliveryReceipt, EmailError> {
        Err(EmailError::Transport("provider unreachable".to_string()))
    }
}

pub(super) fn build_service() -> (
    ViewingService<MemoryViewingRepository, MemoryFeeStore, MemoryListings, MemoryMailer>,
    Arc<MemoryViewingRepository>,
    Arc<MemoryFeeStore>,
    Arc<MemoryMailer>,
) {
    let repository = Arc::new(MemoryViewingRepository::default());
    let fees = Arc::new(MemoryFeeStore::default());
    let listings = Arc::new(MemoryListings::with(vec![sunset_loft()]));
    let mailer = Arc::new(MemoryMailer::default());
    let service = ViewingService::new(
        repository.clone(),
        fees.clone(),
        listings,
        mailer.clone(),
        settings(),
    );
    (service, repository, fees, mailer)
}
