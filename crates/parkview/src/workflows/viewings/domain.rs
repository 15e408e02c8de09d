use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::listings::ApartmentId;

/// Hourly tour slots offered by the leasing office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewingSlot {
    NineAm,
    TenAm,
    ElevenAm,
    Noon,
    OnePm,
    TwoPm,
    ThreePm,
    FourPm,
    FivePm,
}

impl ViewingSlot {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::NineAm,
            Self::TenAm,
            Self::ElevenAm,
            Self::Noon,
            Self::OnePm,
            Self::TwoPm,
            Self::ThreePm,
            Self::FourPm,
            Self::FivePm,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NineAm => "9:00 AM",
            Self::TenAm => "10:00 AM",
            Self::ElevenAm => "11:00 AM",
            Self::Noon => "12:00 PM",
            Self::OnePm => "1:00 PM",
            Self::TwoPm => "2:00 PM",
            Self::ThreePm => "3:00 PM",
            Self::FourPm => "4:00 PM",
            Self::FivePm => "5:00 PM",
        }
    }
}

/// Lifecycle of a viewing request. This service only ever writes `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewingStatus {
    Pending,
    Confirmed,
    Declined,
}

impl ViewingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ViewingStatus::Pending => "pending",
            ViewingStatus::Confirmed => "confirmed",
            ViewingStatus::Declined => "declined",
        }
    }
}

/// Incoming request as posted by the scheduling form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingRequestSubmission {
    pub apartment_id: ApartmentId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: Option<NaiveDate>,
    pub slot: ViewingSlot,
    #[serde(default)]
    pub message: Option<String>,
}

/// Persisted viewing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingRecord {
    pub apartment_id: ApartmentId,
    pub apartment_title: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: NaiveDate,
    pub slot: ViewingSlot,
    pub message: Option<String>,
    pub status: ViewingStatus,
    pub requested_on: NaiveDate,
}
