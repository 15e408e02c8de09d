use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::listings::ApartmentId;

/// Identifier wrapper for application tracking numbers (`PA-` family).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingNumber(pub String);

/// Lifecycle of an application record. This service only ever writes
/// `Submitted`; later transitions belong to the admin review surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Approved,
    Declined,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Declined => "declined",
        }
    }
}

/// Raw form payload as posted by the application form.
///
/// Requiredness is checked by [`RentalApplicationSubmission::validate`];
/// there is deliberately no format validation beyond presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalApplicationSubmission {
    pub apartment_id: ApartmentId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub employment_status: String,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<u32>,
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub occupants: Option<u8>,
    #[serde(default)]
    pub pets: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Submission with all required fields proven present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidApplication {
    pub apartment_id: ApartmentId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub employment_status: String,
    pub employer: Option<String>,
    pub monthly_income: Option<u32>,
    pub move_in_date: NaiveDate,
    pub occupants: Option<u8>,
    pub pets: Option<String>,
    pub additional_info: Option<String>,
}

impl RentalApplicationSubmission {
    pub fn validate(self) -> Result<ValidApplication, ApplicationValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ApplicationValidationError::MissingFullName);
        }
        if self.email.trim().is_empty() {
            return Err(ApplicationValidationError::MissingEmail);
        }
        if self.phone.trim().is_empty() {
            return Err(ApplicationValidationError::MissingPhone);
        }
        if self.employment_status.trim().is_empty() {
            return Err(ApplicationValidationError::MissingEmploymentStatus);
        }
        let move_in_date = self
            .move_in_date
            .ok_or(ApplicationValidationError::MissingMoveInDate)?;

        Ok(ValidApplication {
            apartment_id: self.apartment_id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            employment_status: self.employment_status,
            employer: self.employer,
            monthly_income: self.monthly_income,
            move_in_date,
            occupants: self.occupants,
            pets: self.pets,
            additional_info: self.additional_info,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApplicationValidationError {
    #[error("full name is required")]
    MissingFullName,
    #[error("email is required")]
    MissingEmail,
    #[error("phone number is required")]
    MissingPhone,
    #[error("employment status is required")]
    MissingEmploymentStatus,
    #[error("move-in date is required")]
    MissingMoveInDate,
}

/// Persisted application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalApplicationRecord {
    pub tracking_number: TrackingNumber,
    pub apartment_id: ApartmentId,
    pub apartment_title: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub employment_status: String,
    pub employer: Option<String>,
    pub monthly_income: Option<u32>,
    pub move_in_date: NaiveDate,
    pub occupants: Option<u8>,
    pub pets: Option<String>,
    pub additional_info: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_on: NaiveDate,
}

impl RentalApplicationRecord {
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            tracking_number: self.tracking_number.clone(),
            status: self.status.label(),
            apartment_title: self.apartment_title.clone(),
            submitted_on: self.submitted_on,
        }
    }
}

/// Sanitized representation served by the tracking endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub tracking_number: TrackingNumber,
    pub status: &'static str,
    pub apartment_title: String,
    pub submitted_on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> RentalApplicationSubmission {
        RentalApplicationSubmission {
            apartment_id: ApartmentId("apt-101".to_string()),
            full_name: "Jordan Rivers".to_string(),
            email: "jordan@x.com".to_string(),
            phone: "515-555-0199".to_string(),
            employment_status: "Employed full-time".to_string(),
            employer: Some("Ledger & Co".to_string()),
            monthly_income: Some(4800),
            move_in_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            occupants: Some(2),
            pets: None,
            additional_info: None,
        }
    }

    #[test]
    fn complete_submission_validates() {
        let valid = submission().validate().expect("submission is complete");
        assert_eq!(valid.full_name, "Jordan Rivers");
        assert_eq!(
            valid.move_in_date,
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
        );
    }

    #[test]
    fn each_required_field_is_enforced() {
        let mut missing_name = submission();
        missing_name.full_name = "  ".to_string();
        assert_eq!(
            missing_name.validate().unwrap_err(),
            ApplicationValidationError::MissingFullName
        );

        let mut missing_email = submission();
        missing_email.email = String::new();
        assert_eq!(
            missing_email.validate().unwrap_err(),
            ApplicationValidationError::MissingEmail
        );

        let mut missing_phone = submission();
        missing_phone.phone = String::new();
        assert_eq!(
            missing_phone.validate().unwrap_err(),
            ApplicationValidationError::MissingPhone
        );

        let mut missing_employment = submission();
        missing_employment.employment_status = String::new();
        assert_eq!(
            missing_employment.validate().unwrap_err(),
            ApplicationValidationError::MissingEmploymentStatus
        );

        let mut missing_move_in = submission();
        missing_move_in.move_in_date = None;
        assert_eq!(
            missing_move_in.validate().unwrap_err(),
            ApplicationValidationError::MissingMoveInDate
        );
    }

    #[test]
    fn email_shape_is_not_validated_beyond_presence() {
        let mut odd_email = submission();
        odd_email.email = "not-an-address".to_string();
        assert!(odd_email.validate().is_ok());
    }
}
