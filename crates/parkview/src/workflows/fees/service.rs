use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::domain::{
    ApplicationFeeRecord, FeeApplicant, FeeRequest, FeeStatus, PaymentMethod, TransactionId,
};
use super::repository::{FeeRepository, FeeRepositoryError};
use crate::email::{render_fee_request_notice, EmailGateway, FeeRequestNotice, OutboundEmail};
use crate::listings::{ApartmentId, ListingRepository, ListingStoreError};
use crate::sessions::UserSession;
use crate::workflows::guard::{Busy, SubmissionSlot};
use crate::workflows::tracking::{new_tracking_code, TrackingPrefix};

/// Site-level knobs the fee workflow needs.
#[derive(Debug, Clone)]
pub struct FeeSettings {
    pub default_amount: u32,
    pub admin_address: String,
    pub sender_label: String,
}

/// Orchestrates the fee-request lifecycle: validated request, pending
/// record, best-effort admin nudge, and the verification gate reads.
pub struct FeeService<R, L, G> {
    repository: Arc<R>,
    listings: Arc<L>,
    mailer: Arc<G>,
    slot: SubmissionSlot,
    settings: FeeSettings,
}

/// What the confirmation step shows the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeReceipt {
    pub transaction_id: TransactionId,
    pub amount: u32,
    pub payment_method: PaymentMethod,
    pub status: FeeStatus,
}

/// Outcome of a gate check for (apartment, applicant email).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeGate {
    Verified { transaction_id: TransactionId },
    UnderReview { transaction_id: TransactionId },
    PaymentRequired,
}

impl FeeGate {
    pub const fn label(&self) -> &'static str {
        match self {
            FeeGate::Verified { .. } => "verified",
            FeeGate::UnderReview { .. } => "under_review",
            FeeGate::PaymentRequired => "payment_required",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FeeGate::Verified { .. })
    }
}

/// Fields the payment form may pre-populate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeePrefill {
    pub email: Option<String>,
}

impl<R, L, G> FeeService<R, L, G>
where
    R: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    pub fn new(repository: Arc<R>, listings: Arc<L>, mailer: Arc<G>, settings: FeeSettings) -> Self {
        Self {
            repository,
            listings,
            mailer,
            slot: SubmissionSlot::default(),
            settings,
        }
    }

    /// Create a pending fee record and nudge the admin.
    ///
    /// Selecting a payment method is the trigger; there is no separate
    /// confirm step. The notification email is best-effort: once the
    /// pending record exists it is the source of truth, so a failed send
    /// is logged and the request still succeeds.
    pub fn request(
        &self,
        request: FeeRequest,
        today: NaiveDate,
    ) -> Result<FeeReceipt, FeeServiceError> {
        let _token = self.slot.begin()?;

        let applicant = validated_applicant(request.applicant)?;
        let apartment = self
            .listings
            .get(&request.apartment_id)?
            .ok_or_else(|| FeeServiceError::UnknownApartment(request.apartment_id.0.clone()))?;

        let amount = apartment.fee_due(self.settings.default_amount);
        let transaction_id = TransactionId(new_tracking_code(TrackingPrefix::FeeRequest));

        let record = ApplicationFeeRecord::pending(
            transaction_id.clone(),
            apartment.id.clone(),
            apartment.title.clone(),
            applicant.clone(),
            amount,
            request.payment_method,
            today,
        );
        let stored = self.repository.insert(record)?;

        let notice = FeeRequestNotice {
            transaction_id: stored.transaction_id.0.clone(),
            applicant_name: applicant.full_name,
            applicant_email: applicant.email,
            applicant_phone: applicant.phone,
            apartment_title: apartment.title,
            amount,
            payment_method: request.payment_method,
        };
        let rendered = render_fee_request_notice(&notice, today);
        let message = OutboundEmail {
            from_label: self.settings.sender_label.clone(),
            to: self.settings.admin_address.clone(),
            subject: rendered.subject,
            html_body: rendered.html_body,
        };
        if let Err(err) = self.mailer.send(&message) {
            warn!(
                transaction_id = %stored.transaction_id.0,
                error = %err,
                "fee notification email failed; pending record retained"
            );
        }

        Ok(FeeReceipt {
            transaction_id: stored.transaction_id,
            amount: stored.amount,
            payment_method: stored.payment_method,
            status: stored.status,
        })
    }

    /// Fresh gate check for (apartment, applicant email).
    ///
    /// Read failures collapse to `PaymentRequired`: the gate fails closed.
    pub fn gate(&self, apartment_id: &ApartmentId, email: &str) -> FeeGate {
        match self.repository.latest_verified(apartment_id, email) {
            Ok(Some(record)) => {
                return FeeGate::Verified {
                    transaction_id: record.transaction_id,
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(apartment_id = %apartment_id.0, error = %err, "fee gate read failed");
                return FeeGate::PaymentRequired;
            }
        }

        match self.repository.latest_for_applicant(apartment_id, email) {
            Ok(Some(record)) if record.status == FeeStatus::Pending => FeeGate::UnderReview {
                transaction_id: record.transaction_id,
            },
            Ok(_) => FeeGate::PaymentRequired,
            Err(err) => {
                warn!(apartment_id = %apartment_id.0, error = %err, "fee gate read failed");
                FeeGate::PaymentRequired
            }
        }
    }

    /// Pre-populate the payment form from a signed-in session.
    ///
    /// Only the e-mail carries over. The full name is always typed fresh
    /// by the applicant, even when the session knows a display name.
    pub fn prefill(&self, session: Option<&UserSession>) -> FeePrefill {
        FeePrefill {
            email: session.map(|session| session.email.clone()),
        }
    }
}

fn validated_applicant(applicant: FeeApplicant) -> Result<FeeApplicant, FeeServiceError> {
    if applicant.full_name.trim().is_empty() {
        return Err(FeeServiceError::MissingFullName);
    }
    if applicant.email.trim().is_empty() {
        return Err(FeeServiceError::MissingEmail);
    }
    Ok(applicant)
}

#[derive(Debug, thiserror::Error)]
pub enum FeeServiceError {
    #[error(transparent)]
    Busy(#[from] Busy),
    #[error("full name is required")]
    MissingFullName,
    #[error("email is required")]
    MissingEmail,
    #[error("unknown apartment: {0}")]
    UnknownApartment(String),
    #[error(transparent)]
    Listing(#[from] ListingStoreError),
    #[error(transparent)]
    Repository(#[from] FeeRepositoryError),
}
