//! Application-fee request lifecycle.
//!
//! The client side of a deliberately manual payment flow: we persist a
//! `pending` fee record with a tracking code, nudge the admin by email, and
//! from then on only re-read the record. Verification happens out-of-band
//! when a human reviews the payment proof and flips the status.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationFeeRecord, FeeApplicant, FeeRequest, FeeStatus, PaymentMethod, TransactionId,
    AWAITING_PAYMENT_ID, AWAITING_PAYMENT_TAG,
};
pub use repository::{FeeRepository, FeeRepositoryError};
pub use router::{fee_router, FeeRouterState};
pub use service::{FeeGate, FeePrefill, FeeReceipt, FeeService, FeeServiceError, FeeSettings};
