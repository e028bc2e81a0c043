use crate::models::{blank, AmenitySet, Location, Property, PropertyType};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Locally held, user-editable copy of a listing.
///
/// This is also the JSON body of create and update requests. An empty price
/// input travels as `""`, like the coordinates. The constraints mirror the
/// form's `required`/`min` inputs; category needs none since it always has
/// a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ListingDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default, with = "blank")]
    #[validate(
        required(message = "price is required"),
        range(min = 0.0, message = "price must be at least 0")
    )]
    pub price: Option<f64>,
    #[validate(nested)]
    pub location: Location,
    #[serde(default)]
    pub amenities: AmenitySet,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<&Property> for ListingDraft {
    fn from(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            description: property.description.clone(),
            kind: property.kind,
            price: property.price,
            location: property.location.clone(),
            amenities: property.amenities.clone(),
            images: property.images.clone(),
        }
    }
}

impl From<Property> for ListingDraft {
    fn from(property: Property) -> Self {
        Self {
            title: property.title,
            description: property.description,
            kind: property.kind,
            price: property.price,
            location: property.location,
            amenities: property.amenities,
            images: property.images,
        }
    }
}
