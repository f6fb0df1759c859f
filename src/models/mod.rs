use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rejected listing input, carries a human-readable message
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Identifier of a stored listing, a 24 character hex ObjectId on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyId(ObjectId);

impl PropertyId {
    /// Allocate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for PropertyId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for PropertyId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError(format!("'{}' is not a valid property id", s)))
    }
}

impl TryFrom<String> for PropertyId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0.to_hex()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Kind of real estate being listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Land,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Villa,
        PropertyType::Land,
        PropertyType::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Villa => "Villa",
            PropertyType::Land => "Land",
            PropertyType::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError(format!(
                    "unknown property type '{}', expected one of: {}",
                    s,
                    join_names(Self::ALL.iter().map(|t| t.as_str()))
                ))
            })
    }
}

/// Market status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
    Sold,
    Rented,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 4] = [
        ListingStatus::ForSale,
        ListingStatus::ForRent,
        ListingStatus::Sold,
        ListingStatus::Rented,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "For Sale",
            ListingStatus::ForRent => "For Rent",
            ListingStatus::Sold => "Sold",
            ListingStatus::Rented => "Rented",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = ValidationError;

    /// Accepts the display form ("For Sale") as well as dashed CLI spellings ("for-sale")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                ValidationError(format!(
                    "unknown listing status '{}', expected one of: {}",
                    s,
                    join_names(Self::ALL.iter().map(|st| st.as_str()))
                ))
            })
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// A stored real-estate listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub bedrooms: f64,
    pub bathrooms: f64,
    /// Square feet
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Materialize a validated creation request with store-assigned id and timestamp
    pub fn from_new(id: PropertyId, new: NewProperty, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title.trim().to_string(),
            description: new.description.trim().to_string(),
            price: new.price,
            location: new.location.trim().to_string(),
            property_type: new.property_type,
            status: new.status,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            area: new.area,
            image_url: normalize_url(new.image_url.as_deref()),
            created_at,
        }
    }
}

/// Body of a create request: every listing field except id and createdAt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewProperty {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("location", &self.location)?;
        require_amount("price", self.price)?;
        require_amount("bedrooms", self.bedrooms)?;
        require_amount("bathrooms", self.bathrooms)?;
        require_amount("area", self.area)?;
        Ok(())
    }
}

/// Body of an update request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// An empty string removes the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PropertyUpdate {
    pub fn status(status: ListingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        if let Some(price) = self.price {
            require_amount("price", price)?;
        }
        for (field, value) in [
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("area", self.area),
        ] {
            if let Some(value) = value {
                require_amount(field, value)?;
            }
        }
        Ok(())
    }

    /// Overwrite the provided fields of `property`; id and createdAt never change
    pub fn apply_to(&self, property: &mut Property) {
        if let Some(title) = &self.title {
            property.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            property.description = description.trim().to_string();
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(location) = &self.location {
            property.location = location.trim().to_string();
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(status) = self.status {
            property.status = status;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = bathrooms;
        }
        if let Some(area) = self.area {
            property.area = area;
        }
        if let Some(url) = &self.image_url {
            property.image_url = normalize_url(Some(url));
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{} is required", field)));
    }
    Ok(())
}

fn require_amount(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(())
}

pub(crate) fn normalize_url(url: Option<&str>) -> Option<String> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
}
