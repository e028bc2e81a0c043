mod amenity;
pub mod blank;

pub use amenity::{Amenity, AmenitySet, UnknownAmenity};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Category of the property listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    Apartment,
    Garage,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::Garage => "garage",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown property type '{0}'")]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" => Ok(Self::Apartment),
            "garage" => Ok(Self::Garage),
            other => Err(UnknownPropertyType(other.to_string())),
        }
    }
}

/// Geographic coordinates, each independently optional.
///
/// Written as `latitude`/`longitude`; the short `lat`/`lng` names the
/// backend returns are accepted on read.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    #[serde(alias = "lat", default, with = "blank")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", default, with = "blank")]
    pub longitude: Option<f64>,
}

/// Location information for a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct Location {
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[serde(default)]
    pub coordinates: Coordinates,
}

/// Property listing as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    /// Server-assigned; absent until the listing is persisted.
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// Blank when the listing was saved without a price.
    #[serde(default, with = "blank")]
    pub price: Option<f64>,
    pub location: Location,
    #[serde(default)]
    pub amenities: AmenitySet,
    #[serde(default)]
    pub images: Vec<String>,
}

/// `{ "data": ... }` wrapper used by every backend response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}
