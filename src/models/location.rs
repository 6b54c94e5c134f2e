use serde::{Deserialize, Serialize};

fn default_method() -> u32 {
    3
}

/// A resolved place: either auto-detected via the companion bridge or
/// picked from a city search. Always replaced wholesale, never patched
/// field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Prayer-times calculation method id understood by the upstream API.
    #[serde(default = "default_method")]
    pub method: u32,
}

impl Location {
    pub fn new(city: impl Into<String>, country: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            latitude,
            longitude,
            method: default_method(),
        }
    }

    /// Duplicate rule used by the saved-city list: case-insensitive on
    /// the city name, exact on country.
    pub fn same_city(&self, other: &Location) -> bool {
        self.city.eq_ignore_ascii_case(&other.city) && self.country == other.country
    }
}
