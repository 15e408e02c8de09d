use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::{Apartment, ApartmentId};

/// Parse a listing export CSV into apartments.
///
/// The export uses human-edited columns, so every field is trimmed and the
/// optional ones treat an empty cell as absent.
pub fn parse_listings<R: Read>(reader: R) -> Result<Vec<Apartment>, ListingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut apartments = Vec::new();
    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        let row = record?;
        apartments.push(row.into_apartment(index + 1)?);
    }

    Ok(apartments)
}

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid availability date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: missing listing id")]
    MissingId { row: usize },
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Listing ID")]
    id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "Bedrooms")]
    bedrooms: u8,
    #[serde(rename = "Bathrooms")]
    bathrooms: f32,
    #[serde(rename = "Square Feet")]
    square_feet: u16,
    #[serde(rename = "Rent")]
    rent: u32,
    #[serde(rename = "Deposit")]
    deposit: u32,
    #[serde(
        rename = "Application Fee",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    application_fee: Option<String>,
    #[serde(rename = "Amenities", default, deserialize_with = "empty_string_as_none")]
    amenities: Option<String>,
    #[serde(rename = "Photos", default, deserialize_with = "empty_string_as_none")]
    photos: Option<String>,
    #[serde(rename = "Available On")]
    available_on: String,
}

impl ListingRow {
    fn into_apartment(self, row: usize) -> Result<Apartment, ListingImportError> {
        if self.id.is_empty() {
            return Err(ListingImportError::MissingId { row });
        }

        let available_on = NaiveDate::parse_from_str(&self.available_on, "%Y-%m-%d").map_err(
            |_| ListingImportError::InvalidDate {
                row,
                value: self.available_on.clone(),
            },
        )?;

        let application_fee = self
            .application_fee
            .as_deref()
            .and_then(|raw| raw.parse::<u32>().ok());

        Ok(Apartment {
            id: ApartmentId(self.id),
            title: self.title,
            address: self.address,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            rent: self.rent,
            deposit: self.deposit,
            application_fee,
            amenities: split_list(self.amenities),
            image_urls: split_list(self.photos),
            available_on,
        })
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}
