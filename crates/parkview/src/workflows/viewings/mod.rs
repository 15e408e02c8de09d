//! Viewing-request scheduling, gated on a verified application fee.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ViewingRecord, ViewingRequestSubmission, ViewingSlot, ViewingStatus,
};
pub use repository::{ViewingRepository, ViewingRepositoryError};
pub use router::viewing_router;
pub use service::{ScheduledViewing, ViewingService, ViewingServiceError, ViewingSettings};
