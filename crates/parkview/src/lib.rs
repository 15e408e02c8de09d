//! Core workflows for the Parkview apartment leasing site.
//!
//! The remote collaborators of the production deployment (record store,
//! email provider, auth session) are expressed as traits so every workflow
//! can be exercised against in-memory implementations.

pub mod config;
pub mod email;
pub mod error;
pub mod listings;
pub mod sessions;
pub mod telemetry;
pub mod workflows;
