use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::domain::{
    ViewingRecord, ViewingRequestSubmission, ViewingSlot, ViewingStatus,
};
use super::repository::{ViewingRepository, ViewingRepositoryError};
use crate::email::{render_viewing_notice, EmailGateway, OutboundEmail, ViewingNotice};
use crate::listings::{ListingRepository, ListingStoreError};
use crate::workflows::fees::FeeRepository;
use crate::workflows::guard::{Busy, SubmissionSlot};

/// Site-level knobs the viewing workflow needs.
#[derive(Debug, Clone)]
pub struct ViewingSettings {
    pub admin_address: String,
    pub sender_label: String,
}

/// Schedules tour requests once the application fee has been verified.
///
/// The gate consults the fee store directly: a verified fee for the
/// (apartment, email) pair is the capability to schedule, checked fresh on
/// every call.
pub struct ViewingService<R, F, L, G> {
    repository: Arc<R>,
    fees: Arc<F>,
    listings: Arc<L>,
    mailer: Arc<G>,
    slot: SubmissionSlot,
    settings: ViewingSettings,
}

/// What the success state shows the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledViewing {
    pub apartment_title: String,
    pub preferred_date: NaiveDate,
    pub slot: ViewingSlot,
    pub status: ViewingStatus,
}

impl<R, F, L, G> ViewingService<R, F, L, G>
where
    R: ViewingRepository + 'static,
    F: FeeRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    pub fn new(
        repository: Arc<R>,
        fees: Arc<F>,
        listings: Arc<L>,
        mailer: Arc<G>,
        settings: ViewingSettings,
    ) -> Self {
        Self {
            repository,
            fees,
            listings,
            mailer,
            slot: SubmissionSlot::default(),
            settings,
        }
    }

    /// Persist a viewing request and notify the leasing admin.
    ///
    /// The admin notification is best-effort; the stored request is what
    /// the office works from.
    pub fn schedule(
        &self,
        submission: ViewingRequestSubmission,
        today: NaiveDate,
    ) -> Result<ScheduledViewing, ViewingServiceError> {
        let _token = self.slot.begin()?;

        let submission = validated(submission)?;
        let preferred_date = submission
            .preferred_date
            .ok_or(ViewingServiceError::MissingPreferredDate)?;
        if preferred_date < today {
            return Err(ViewingServiceError::DateInPast(preferred_date));
        }

        let verified = self
            .fees
            .latest_verified(&submission.apartment_id, &submission.email)
            .unwrap_or_else(|err| {
                warn!(
                    apartment_id = %submission.apartment_id.0,
                    error = %err,
                    "fee gate read failed during scheduling"
                );
                None
            });
        if verified.is_none() {
            return Err(ViewingServiceError::FeeNotVerified);
        }

        let apartment = self
            .listings
            .get(&submission.apartment_id)?
            .ok_or_else(|| {
                ViewingServiceError::UnknownApartment(submission.apartment_id.0.clone())
            })?;

        let record = ViewingRecord {
            apartment_id: apartment.id.clone(),
            apartment_title: apartment.title.clone(),
            full_name: submission.full_name,
            email: submission.email,
            phone: submission.phone,
            preferred_date,
            slot: submission.slot,
            message: submission.message,
            status: ViewingStatus::Pending,
            requested_on: today,
        };
        let stored = self.repository.insert(record)?;

        let notice = ViewingNotice {
            applicant_name: stored.full_name.clone(),
            applicant_email: stored.email.clone(),
            applicant_phone: stored.phone.clone(),
            apartment_title: stored.apartment_title.clone(),
            preferred_date: stored.preferred_date,
            slot: stored.slot,
            message: stored.message.clone(),
        };
        let rendered = render_viewing_notice(&notice, today);
        let message = OutboundEmail {
            from_label: self.settings.sender_label.clone(),
            to: self.settings.admin_address.clone(),
            subject: rendered.subject,
            html_body: rendered.html_body,
        };
        if let Err(err) = self.mailer.send(&message) {
            warn!(
                apartment_id = %stored.apartment_id.0,
                error = %err,
                "viewing notification email failed; request retained"
            );
        }

        Ok(ScheduledViewing {
            apartment_title: stored.apartment_title,
            preferred_date: stored.preferred_date,
            slot: stored.slot,
            status: stored.status,
        })
    }
}

fn validated(
    submission: ViewingRequestSubmission,
) -> Result<ViewingRequestSubmission, ViewingServiceError> {
    if submission.full_name.trim().is_empty() {
        return Err(ViewingServiceError::MissingFullName);
    }
    if submission.email.trim().is_empty() {
        return Err(ViewingServiceError::MissingEmail);
    }
    if submission.phone.trim().is_empty() {
        return Err(ViewingServiceError::MissingPhone);
    }
    Ok(submission)
}

#[derive(Debug, thiserror::Error)]
pub enum ViewingServiceError {
    #[error(transparent)]
    Busy(#[from] Busy),
    #[error("full name is required")]
    MissingFullName,
    #[error("email is required")]
    MissingEmail,
    #[error("phone number is required")]
    MissingPhone,
    #[error("preferred date is required")]
    MissingPreferredDate,
    #[error("preferred date {0} is in the past")]
    DateInPast(NaiveDate),
    #[error("a verified application fee is required before scheduling")]
    FeeNotVerified,
    #[error("unknown apartment: {0}")]
    UnknownApartment(String),
    #[error(transparent)]
    Listing(#[from] ListingStoreError),
    #[error(transparent)]
    Repository(#[from] ViewingRepositoryError),
}
