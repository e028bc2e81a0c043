use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Closed vocabulary of amenity tags a listing can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Wifi,
    Parking,
    Gym,
    Pool,
    Laundry,
    Security,
    Elevator,
    Balcony,
    Furnished,
    AirConditioning,
    Heating,
    Kitchen,
    Garden,
}

impl Amenity {
    pub const ALL: [Amenity; 13] = [
        Amenity::Wifi,
        Amenity::Parking,
        Amenity::Gym,
        Amenity::Pool,
        Amenity::Laundry,
        Amenity::Security,
        Amenity::Elevator,
        Amenity::Balcony,
        Amenity::Furnished,
        Amenity::AirConditioning,
        Amenity::Heating,
        Amenity::Kitchen,
        Amenity::Garden,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wifi => "wifi",
            Self::Parking => "parking",
            Self::Gym => "gym",
            Self::Pool => "pool",
            Self::Laundry => "laundry",
            Self::Security => "security",
            Self::Elevator => "elevator",
            Self::Balcony => "balcony",
            Self::Furnished => "furnished",
            Self::AirConditioning => "air_conditioning",
            Self::Heating => "heating",
            Self::Kitchen => "kitchen",
            Self::Garden => "garden",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown amenity '{0}'")]
pub struct UnknownAmenity(pub String);

impl FromStr for Amenity {
    type Err = UnknownAmenity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Amenity::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| UnknownAmenity(s.to_string()))
    }
}

/// Set of amenities. Order-free and duplicate-free by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AmenitySet(BTreeSet<Amenity>);

impl AmenitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, amenity: Amenity) -> bool {
        self.0.contains(&amenity)
    }

    /// Add the amenity if absent, remove it if present.
    /// Returns whether the amenity is selected afterwards.
    pub fn toggle(&mut self, amenity: Amenity) -> bool {
        if self.0.remove(&amenity) {
            false
        } else {
            self.0.insert(amenity);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Amenity> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Amenity> for AmenitySet {
    fn from_iter<I: IntoIterator<Item = Amenity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for AmenitySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Tags outside the vocabulary can only come from a newer backend; drop them.
        let raw = Vec::<String>::deserialize(deserializer)?;
        let mut set = BTreeSet::new();
        for tag in raw {
            match tag.parse::<Amenity>() {
                Ok(amenity) => {
                    set.insert(amenity);
                }
                Err(err) => warn!("Ignoring {}", err),
            }
        }
        Ok(Self(set))
    }
}
