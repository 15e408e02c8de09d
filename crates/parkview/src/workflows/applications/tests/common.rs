use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::email::{DeliveryReceipt, EmailError, EmailGateway, OutboundEmail};
use crate::listings::{Apartment, ApartmentId, ListingRepository, ListingStoreError};
use crate::workflows::applications::domain::{
    RentalApplicationRecord, RentalApplicationSubmission,
};
use crate::workflows::applications::repository::{
    ApplicationRepository, ApplicationRepositoryError,
};
use crate::workflows::applications::service::{ApplicationService, ApplicationSettings};

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

pub(super) fn settings() -> ApplicationSettings {
    ApplicationSettings {
        sender_label: "Parkview Apartments".to_string(),
        base_url: "https://parkview.example".to_string(),
    }
}

pub(super) fn submission() -> RentalApplicationSubmission {
    RentalApplicationSubmission {
        apartment_id: ApartmentId("apt-101".to_string()),
        full_name: "Jordan Rivers".to_string(),
        email: "jordan@x.com".to_string(),
        phone: "515-555-0199".to_string(),
        employment_status: "Employed full-time".to_string(),
        employer: Some("Ledger & Co".to_string()),
        monthly_income: Some(4800),
        move_in_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        occupants: Some(2),
        pets: Some("One cat".to_string()),
        additional_info: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplicationRepository {
    records: Arc<Mutex<Vec<RentalApplicationRecord>>>,
}

impl MemoryApplicationRepository {
    pub(super) fn records(&self) -> Vec<RentalApplicationRecord> {
        self.records
            .lock()
            .expect("application mutex poisoned")
            .clone()
    }
}

impl ApplicationRepository for MemoryApplicationRepository {
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

pub(super) struct UnavailableApplicationRepository;

impl ApplicationRepository for UnavailableApplicationRepository {
    fn insert(
        &self,
        _record: RentalApplicationRecord,
    ) -> Result<RentalApplicationRecord, ApplicationRepositoryError> {
        Err(ApplicationRepositoryError::Unavailable(
            "store offline".to_string(),
        ))
    }

    fn find_by_tracking(
        &self,
        _tracking_number: &str,
    ) -> Result<Option<RentalApplicationRecord>, ApplicationRepositoryError> {
        Err(ApplicationRepositoryError::Unavailable(
            "store offline".to_string(),
        ))
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
    ApplicationService<MemoryApplicationRepository, MemoryListings, MemoryMailer>,
    Arc<MemoryApplicationRepository>,
    Arc<MemoryMailer>,
) {
    let repository = Arc::new(MemoryApplicationRepository::default());
    let listings = Arc::new(MemoryListings::with(vec![sunset_loft()]));
    let mailer = Arc::new(MemoryMailer::default());
    let service = ApplicationService::new(repository.clone(), listings, mailer.clone(), settings());
    (service, repository, mailer)
}
