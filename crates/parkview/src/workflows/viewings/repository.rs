use super::domain::ViewingRecord;

/// Storage seam over the viewing-request records.
pub trait ViewingRepository: Send + Sync {
    fn insert(&self, record: ViewingRecord) -> Result<ViewingRecord, ViewingRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ViewingRepositoryError {
    #[error("viewing store unavailable: {0}")]
    Unavailable(String),
}
