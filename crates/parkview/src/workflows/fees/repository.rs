use super::domain::ApplicationFeeRecord;
use crate::listings::ApartmentId;

/// Storage seam over the fee records in the external store.
///
/// The queries mirror the store's filter-with-sort-and-limit surface: both
/// lookups return the newest matching record.
pub trait FeeRepository: Send + Sync {
    fn insert(
        &self,
        record: ApplicationFeeRecord,
    ) -> Result<ApplicationFeeRecord, FeeRepositoryError>;

    /// Newest `verified` fee for the (apartment, applicant email) pair.
    fn latest_verified(
        &self,
        apartment_id: &ApartmentId,
        email: &str,
    ) -> Result<Option<ApplicationFeeRecord>, FeeRepositoryError>;

    /// Newest fee of any status for the (apartment, applicant email) pair.
    fn latest_for_applicant(
        &self,
        apartment_id: &ApartmentId,
        email: &str,
    ) -> Result<Option<ApplicationFeeRecord>, FeeRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeeRepositoryError {
    #[error("fee record already exists")]
    Conflict,
    #[error("fee store unavailable: {0}")]
    Unavailable(String),
}
