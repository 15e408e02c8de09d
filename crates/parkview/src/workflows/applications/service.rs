use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{
    ApplicationStatus, ApplicationStatusView, ApplicationValidationError,
    RentalApplicationRecord, RentalApplicationSubmission, TrackingNumber,
};
use super::repository::{ApplicationRepository, ApplicationRepositoryError};
use crate::email::{
    render_application_confirmation, ApplicationConfirmation, EmailError, EmailGateway,
    OutboundEmail,
};
use crate::listings::{ListingRepository, ListingStoreError};
use crate::workflows::guard::{Busy, SubmissionSlot};
use crate::workflows::tracking::{new_tracking_code, TrackingPrefix};

/// Site-level knobs the application workflow needs.
#[derive(Debug, Clone)]
pub struct ApplicationSettings {
    pub sender_label: String,
    /// Base URL for the tracking deep link embedded in the confirmation.
    pub base_url: String,
}

/// Orchestrates application intake: presence validation, persistence, and
/// the applicant confirmation email.
pub struct ApplicationService<R, L, G> {
    repository: Arc<R>,
    listings: Arc<L>,
    mailer: Arc<G>,
    slot: SubmissionSlot,
    settings: ApplicationSettings,
}

/// What the success state shows the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedApplication {
    pub tracking_number: TrackingNumber,
    pub apartment_title: String,
    pub status: ApplicationStatus,
}

impl<R, L, G> ApplicationService<R, L, G>
where
    R: ApplicationRepository + 'static,
    L: ListingRepository + 'static,
    G: EmailGateway + 'static,
{
    pub fn new(
        repository: Arc<R>,
        listings: Arc<L>,
        mailer: Arc<G>,
        settings: ApplicationSettings,
    ) -> Self {
        Self {
            repository,
            listings,
            mailer,
            slot: SubmissionSlot::default(),
            settings,
        }
    }

    /// Submit a rental application.
    ///
    /// The attempt is all-or-nothing from the applicant's point of view: a
    /// failed confirmation send fails the whole operation, and the already
    /// persisted record is left behind without a compensating delete.
    pub fn submit(
        &self,
        submission: RentalApplicationSubmission,
        today: NaiveDate,
    ) -> Result<SubmittedApplication, ApplicationServiceError> {
        let _token = self.slot.begin()?;

        let valid = submission.validate()?;
        let apartment = self
            .listings
            .get(&valid.apartment_id)?
            .ok_or_else(|| ApplicationServiceError::UnknownApartment(valid.apartment_id.0.clone()))?;

        let tracking_number =
            TrackingNumber(new_tracking_code(TrackingPrefix::RentalApplication));

        let record = RentalApplicationRecord {
            tracking_number: tracking_number.clone(),
            apartment_id: apartment.id.clone(),
            apartment_title: apartment.title.clone(),
            full_name: valid.full_name.clone(),
            email: valid.email.clone(),
            phone: valid.phone,
            employment_status: valid.employment_status,
            employer: valid.employer,
            monthly_income: valid.monthly_income,
            move_in_date: valid.move_in_date,
            occupants: valid.occupants,
            pets: valid.pets,
            additional_info: valid.additional_info,
            status: ApplicationStatus::Submitted,
            submitted_on: today,
        };
        let stored = self.repository.insert(record)?;

        let confirmation = ApplicationConfirmation {
            tracking_number: stored.tracking_number.0.clone(),
            applicant_name: valid.full_name,
            apartment_title: apartment.title.clone(),
            move_in_date: stored.move_in_date,
            tracking_url: format!(
                "{}/track?code={}",
                self.settings.base_url, stored.tracking_number.0
            ),
        };
        let rendered = render_application_confirmation(&confirmation, today);
        let message = OutboundEmail {
            from_label: self.settings.sender_label.clone(),
            to: valid.email,
            subject: rendered.subject,
            html_body: rendered.html_body,
        };
        self.mailer
            .send(&message)
            .map_err(ApplicationServiceError::Notification)?;

        Ok(SubmittedApplication {
            tracking_number: stored.tracking_number,
            apartment_title: stored.apartment_title,
            status: stored.status,
        })
    }

    /// Look up an application by the tracking code from the email link.
    pub fn track(
        &self,
        code: &str,
    ) -> Result<Option<ApplicationStatusView>, ApplicationServiceError> {
        let record = self.repository.find_by_tracking(code.trim())?;
        Ok(record.map(|record| record.status_view()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Busy(#[from] Busy),
    #[error(transparent)]
    Validation(#[from] ApplicationValidationError),
    #[error("unknown apartment: {0}")]
    UnknownApartment(String),
    #[error(transparent)]
    Listing(#[from] ListingStoreError),
    #[error(transparent)]
    Repository(#[from] ApplicationRepositoryError),
    #[error("confirmation email failed: {0}")]
    Notification(EmailError),
}
