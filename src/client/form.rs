use crate::client::api::{ClientError, ClientResult};
use crate::models::{ListingStatus, NewProperty, PropertyType};
use std::str::FromStr;

/// Raw input of the "add property" form. Numeric fields are kept as text
/// until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub image_url: String,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            location: String::new(),
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            bedrooms: String::new(),
            bathrooms: String::new(),
            area: String::new(),
            image_url: String::new(),
        }
    }
}

impl PropertyForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Coerce the numeric inputs and build a create request
    pub fn to_new_property(&self) -> ClientResult<NewProperty> {
        let new = NewProperty {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: number("price", &self.price)?,
            location: self.location.trim().to_string(),
            property_type: self.property_type,
            status: self.status,
            bedrooms: number("bedrooms", &self.bedrooms)?,
            bathrooms: number("bathrooms", &self.bathrooms)?,
            area: number("area", &self.area)?,
            image_url: Some(self.image_url.trim().to_string()).filter(|u| !u.is_empty()),
        };
        new.validate().map_err(|e| ClientError::Form(e.0))?;
        Ok(new)
    }
}

fn number<T: FromStr>(field: &str, raw: &str) -> ClientResult<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ClientError::Form(format!("{} is required", field)));
    }
    raw.replace(',', "")
        .parse()
        .map_err(|_| ClientError::Form(format!("{} must be a number, got '{}'", field, raw)))
}
