//! Apartment listings consumed by the intake workflows.
//!
//! Listings are read-only input owned by an external inventory system;
//! this module gives them a typed shape, a repository seam, and a CSV
//! importer for seeding local runs.

pub mod domain;
pub mod import;
pub mod repository;

pub use domain::{Apartment, ApartmentId};
pub use import::{parse_listings, ListingImportError};
pub use repository::{ListingRepository, ListingStoreError};
