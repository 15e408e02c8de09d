use super::domain::{Apartment, ApartmentId};

/// Read-only seam over the external listing inventory.
pub trait ListingRepository: Send + Sync {
    fn get(&self, id: &ApartmentId) -> Result<Option<Apartment>, ListingStoreError>;
    fn list(&self) -> Result<Vec<Apartment>, ListingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ListingStoreError {
    #[error("listing store unavailable: {0}")]
    Unavailable(String),
}
