use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for apartments in the external inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApartmentId(pub String);

/// Advertised apartment as consumed by the intake workflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: ApartmentId,
    pub title: String,
    pub address: String,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub square_feet: u16,
    pub rent: u32,
    pub deposit: u32,
    /// Per-apartment override of the standard application fee.
    pub application_fee: Option<u32>,
    pub amenities: Vec<String>,
    pub image_urls: Vec<String>,
    pub available_on: NaiveDate,
}

impl Apartment {
    /// Fee owed for this apartment, falling back to the site default.
    pub fn fee_due(&self, default_fee: u32) -> u32 {
        self.application_fee.unwrap_or(default_fee)
    }
}
