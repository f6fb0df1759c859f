use crate::client::filter::{apply_filters, Filters};
use crate::models::Property;
use std::fmt;

pub const EMPTY_MESSAGE: &str = "No properties found";
pub const EMPTY_HINT: &str = "Try adjusting your search or filters, or add a new property!";

/// Whether the listing collection has been fetched yet
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(Vec<Property>),
}

/// Immutable snapshot of the catalog view: fetched data plus filter state.
/// Every change produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogView {
    load: LoadState,
    filters: Filters,
}

impl CatalogView {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn with_properties(self, properties: Vec<Property>) -> Self {
        Self {
            load: LoadState::Loaded(properties),
            ..self
        }
    }

    pub fn with_filters(self, filters: Filters) -> Self {
        Self { filters, ..self }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    /// The full fetched list, empty while loading
    pub fn properties(&self) -> &[Property] {
        match &self.load {
            LoadState::Loading => &[],
            LoadState::Loaded(properties) => properties,
        }
    }

    /// The filtered list, `None` until data has been fetched
    pub fn derived(&self) -> Option<Vec<Property>> {
        match &self.load {
            LoadState::Loading => None,
            LoadState::Loaded(properties) => Some(apply_filters(properties, &self.filters)),
        }
    }

    pub fn render(&self) -> Rendered {
        match self.derived() {
            None => Rendered::Loading,
            Some(visible) if visible.is_empty() => Rendered::Empty,
            Some(visible) => Rendered::Grid(visible),
        }
    }

    pub fn summary(&self) -> String {
        let shown = self.derived().map_or(0, |v| v.len());
        format!(
            "Showing {} of {} properties",
            shown,
            self.properties().len()
        )
    }
}

/// What the view should display
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Loading,
    Empty,
    Grid(Vec<Property>),
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Loading => writeln!(f, "Loading properties..."),
            Rendered::Empty => {
                writeln!(f, "{}", EMPTY_MESSAGE)?;
                writeln!(f, "{}", EMPTY_HINT)
            }
            Rendered::Grid(properties) => {
                for (i, property) in properties.iter().enumerate() {
                    write_card(f, i + 1, property)?;
                }
                Ok(())
            }
        }
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, n: usize, property: &Property) -> fmt::Result {
    writeln!(f, "{}. {} (₹{})", n, property.title, format_amount(property.price))?;
    writeln!(f, "   {}", property.description)?;
    writeln!(f, "   Location: {}", property.location)?;
    writeln!(
        f,
        "   {} Beds, {} Baths, {} sq ft",
        property.bedrooms,
        property.bathrooms,
        format_amount(property.area)
    )?;
    writeln!(f, "   {} | {}", property.property_type, property.status)?;
    if let Some(url) = &property.image_url {
        writeln!(f, "   Image: {}", url)?;
    }
    writeln!(f, "   ID: {}", property.id)?;
    writeln!(f)
}

/// Group the integer part with commas, keep up to two decimals.
/// Values beyond the `u64` range are printed ungrouped.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if !rounded.is_finite() || rounded.abs() >= u64::MAX as f64 {
        return format!("{}", rounded);
    }
    let whole = rounded.trunc().abs() as u64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let cents = ((rounded.abs() - whole as f64) * 100.0).round() as u64;
    let sign = if rounded < 0.0 { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, cents)
    }
}
