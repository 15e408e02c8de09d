//! Rental application intake.
//!
//! Collects applicant details, persists a `submitted` record under a `PA-`
//! tracking number, and emails the applicant a confirmation with a
//! tracking deep link.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationStatus, ApplicationStatusView, ApplicationValidationError,
    RentalApplicationRecord, RentalApplicationSubmission, TrackingNumber, ValidApplication,
};
pub use repository::{ApplicationRepository, ApplicationRepositoryError};
pub use router::application_router;
pub use service::{
    ApplicationService, ApplicationServiceError, ApplicationSettings, SubmittedApplication,
};
