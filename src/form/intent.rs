use crate::api::ImageFile;
use crate::models::{blank, Amenity, PropertyType};
use crate::mvi::Intent;
use thiserror::Error;

/// Title, description, category and price
#[derive(Debug, Clone, PartialEq)]
pub enum BasicField {
    Title(String),
    Description(String),
    Kind(PropertyType),
    Price(Option<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// One edit to the draft, per field group.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftIntent {
    SetBasic(BasicField),
    SetAddress(String),
    SetCoordinate { axis: Axis, value: Option<f64> },
    ToggleAmenity(Amenity),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl DraftIntent {
    /// Map a textual `path=value` assignment onto a typed edit.
    ///
    /// Only the draft's known fields are addressable; coordinates accept
    /// both the long and short axis names.
    pub fn from_assignment(path: &str, value: &str) -> Result<Self, AssignmentError> {
        let invalid = |reason: String| AssignmentError::InvalidValue {
            field: path.to_string(),
            reason,
        };

        let intent = match path.trim() {
            "title" => DraftIntent::SetBasic(BasicField::Title(value.to_string())),
            "description" => DraftIntent::SetBasic(BasicField::Description(value.to_string())),
            "type" => DraftIntent::SetBasic(BasicField::Kind(
                value
                    .parse::<PropertyType>()
                    .map_err(|e| invalid(e.to_string()))?,
            )),
            "price" => DraftIntent::SetBasic(BasicField::Price(
                blank::parse_input(value).map_err(invalid)?,
            )),
            "location.address" => DraftIntent::SetAddress(value.to_string()),
            "location.coordinates.latitude" | "location.coordinates.lat" => DraftIntent::SetCoordinate {
                axis: Axis::Latitude,
                value: blank::parse_input(value).map_err(invalid)?,
            },
            "location.coordinates.longitude" | "location.coordinates.lng" => DraftIntent::SetCoordinate {
                axis: Axis::Longitude,
                value: blank::parse_input(value).map_err(invalid)?,
            },
            other => return Err(AssignmentError::UnknownField(other.to_string())),
        };
        Ok(intent)
    }
}

/// Everything that can happen to a form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormIntent {
    Edit(DraftIntent),
    /// Replaces the current file selection.
    SelectImages(Vec<ImageFile>),
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed,
}

impl Intent for FormIntent {}

impl From<DraftIntent> for FormIntent {
    fn from(intent: DraftIntent) -> Self {
        FormIntent::Edit(intent)
    }
}
