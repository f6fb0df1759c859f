use crate::models::{ListingStatus, Property, PropertyType, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A select-style filter: the `All` sentinel or one exact value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T> FromStr for Choice<T>
where
    T: FromStr<Err = ValidationError>,
{
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Choice::All)
        } else {
            s.parse().map(Choice::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("all"),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

/// Search and filter state of the listing view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filters {
    /// Case-insensitive substring matched against title, location and description
    pub search: String,
    pub property_type: Choice<PropertyType>,
    pub status: Choice<ListingStatus>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Filters {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_type(mut self, property_type: Choice<PropertyType>) -> Self {
        self.property_type = property_type;
        self
    }

    pub fn with_status(mut self, status: Choice<ListingStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_min_price(mut self, min: Option<f64>) -> Self {
        self.min_price = min;
        self
    }

    pub fn with_max_price(mut self, max: Option<f64>) -> Self {
        self.max_price = max;
        self
    }

    fn matches_search(&self, property: &Property) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        [&property.title, &property.location, &property.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    /// Every active predicate must hold
    pub fn matches(&self, property: &Property) -> bool {
        self.matches_search(property)
            && self.property_type.accepts(&property.property_type)
            && self.status.accepts(&property.status)
            && self.min_price.map_or(true, |min| property.price >= min)
            && self.max_price.map_or(true, |max| property.price <= max)
    }
}

/// Derive the visible listings from the fetched list. The input is left
/// untouched and its order preserved.
pub fn apply_filters(properties: &[Property], filters: &Filters) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect()
}
