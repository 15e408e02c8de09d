use super::domain::RentalApplicationRecord;

/// Storage seam over the rental-application records.
pub trait ApplicationRepository: Send + Sync {
    fn insert(
        &self,
        record: RentalApplicationRecord,
    ) -> Result<RentalApplicationRecord, ApplicationRepositoryError>;

    fn find_by_tracking(
        &self,
        tracking_number: &str,
    ) -> Result<Option<RentalApplicationRecord>, ApplicationRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationRepositoryError {
    #[error("application record already exists")]
    Conflict,
    #[error("application store unavailable: {0}")]
    Unavailable(String),
}
