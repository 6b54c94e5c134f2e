//! Companion services: everything the app cannot know by itself.
//! Geolocation, city search, and the monthly timings feed all come
//! from HTTP services behind the [`Companion`] trait, so the UI and
//! tests can swap in canned responders.

pub mod client;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Location, MonthlyCache};

pub use client::HttpBridge;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service}: {message}")]
    Api { service: &'static str, message: String },

    #[error("malformed response from {service}: {source}")]
    Malformed {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A coarse device position, resolved from the network side.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFix {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One row from the city search service.
#[derive(Debug, Clone, Deserialize)]
pub struct CityHit {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub population: Option<u64>,
}

impl CityHit {
    pub fn into_location(self) -> Location {
        Location::new(&self.name, &self.country, self.latitude, self.longitude)
    }
}

/// The three requests the app makes of the outside world. An empty
/// search result is a normal answer, not an error.
pub trait Companion: Send {
    fn locate(&self) -> Result<GeoFix, BridgeError>;
    fn search_city(&self, query: &str) -> Result<Vec<CityHit>, BridgeError>;
    fn fetch_month(
        &self,
        location: &Location,
        year: i32,
        month: u32,
    ) -> Result<MonthlyCache, BridgeError>;
}
