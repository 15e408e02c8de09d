use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::listings::ApartmentId;

/// Identifier wrapper for fee tracking codes (`PF-` family).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub String);

/// Placeholder until an admin fills in the real recipient out-of-band.
pub const AWAITING_PAYMENT_TAG: &str = "Awaiting Tag";
pub const AWAITING_PAYMENT_ID: &str = "Awaiting ID";

/// Manual payment channels offered to applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Zelle,
    Chime,
}

impl PaymentMethod {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::Zelle => "Zelle",
            PaymentMethod::Chime => "Chime",
        }
    }
}

/// Lifecycle of a fee record. This service only ever writes `Pending`;
/// the other states are set by the admin review tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    Pending,
    Verified,
    Rejected,
}

impl FeeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FeeStatus::Pending => "pending",
            FeeStatus::Verified => "verified",
            FeeStatus::Rejected => "rejected",
        }
    }
}

/// Contact details collected on the fee form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeApplicant {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Incoming fee request as posted by the payment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRequest {
    pub apartment_id: ApartmentId,
    pub applicant: FeeApplicant,
    pub payment_method: PaymentMethod,
}

/// Persisted fee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationFeeRecord {
    pub transaction_id: TransactionId,
    pub apartment_id: ApartmentId,
    pub apartment_title: String,
    pub applicant: FeeApplicant,
    pub amount: u32,
    pub payment_method: PaymentMethod,
    pub payment_tag: String,
    pub payment_id: String,
    pub status: FeeStatus,
    pub requested_on: NaiveDate,
}

impl ApplicationFeeRecord {
    /// Fresh `pending` record with the admin-side fields still placeholders.
    pub fn pending(
        transaction_id: TransactionId,
        apartment_id: ApartmentId,
        apartment_title: String,
        applicant: FeeApplicant,
        amount: u32,
        payment_method: PaymentMethod,
        requested_on: NaiveDate,
    ) -> Self {
        Self {
            transaction_id,
            apartment_id,
            apartment_title,
            applicant,
            amount,
            payment_method,
            payment_tag: AWAITING_PAYMENT_TAG.to_string(),
            payment_id: AWAITING_PAYMENT_ID.to_string(),
            status: FeeStatus::Pending,
            requested_on,
        }
    }
}
