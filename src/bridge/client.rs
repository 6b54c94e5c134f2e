//! Blocking HTTP implementation of [`Companion`].
//!
//! Callers run these requests on worker threads, never on the UI
//! thread, so plain blocking reqwest keeps the whole crate free of an
//! async runtime. Base URLs come from config, which is also how the
//! tests point the client at a local mock server.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::bridge::{BridgeError, CityHit, Companion, GeoFix};
use crate::config::BridgeConfig;
use crate::models::{Location, MonthlyCache, PrayerDay};

#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: Client,
    prayer_base: String,
    geo_url: String,
    city_url: String,
    city_api_key: String,
}

impl HttpBridge {
    pub fn new(config: &BridgeConfig) -> Result<Self, BridgeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            prayer_base: config.prayer_base_url.trim_end_matches('/').to_string(),
            geo_url: config.geo_url.clone(),
            city_url: config.city_url.clone(),
            city_api_key: config.city_api_key.clone(),
        })
    }

    fn get_text(&self, request: reqwest::blocking::RequestBuilder) -> Result<String, BridgeError> {
        let response = request.send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

impl Companion for HttpBridge {
    fn locate(&self) -> Result<GeoFix, BridgeError> {
        let body = self.get_text(self.client.get(&self.geo_url))?;
        parse_geo(&body)
    }

    fn search_city(&self, query: &str) -> Result<Vec<CityHit>, BridgeError> {
        if self.city_api_key.is_empty() {
            return Err(BridgeError::Api {
                service: "city search",
                message: "no API key configured".to_string(),
            });
        }
        let body = self.get_text(
            self.client
                .get(&self.city_url)
                .query(&[("name", query)])
                .header("X-Api-Key", &self.city_api_key),
        )?;
        serde_json::from_str(&body).map_err(|source| BridgeError::Malformed {
            service: "city search",
            source,
        })
    }

    fn fetch_month(
        &self,
        location: &Location,
        year: i32,
        month: u32,
    ) -> Result<MonthlyCache, BridgeError> {
        let url = format!("{}/calendar/{}/{}", self.prayer_base, year, month);
        let body = self.get_text(self.client.get(&url).query(&[
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("method", location.method.to_string()),
        ]))?;

        let days = parse_calendar(&body)?;
        Ok(MonthlyCache {
            month: format!("{:02}", month),
            year: year.to_string(),
            data: days,
        })
    }
}

// ─── Response parsing ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GeoWire {
    status: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

fn parse_geo(body: &str) -> Result<GeoFix, BridgeError> {
    let wire: GeoWire = serde_json::from_str(body).map_err(|source| BridgeError::Malformed {
        service: "geolocation",
        source,
    })?;

    if wire.status != "success" {
        return Err(BridgeError::Api {
            service: "geolocation",
            message: wire.message.unwrap_or_else(|| wire.status.clone()),
        });
    }
    match (wire.lat, wire.lon) {
        (Some(latitude), Some(longitude)) => Ok(GeoFix {
            city: wire.city.unwrap_or_else(|| "Unknown".to_string()),
            country: wire.country.unwrap_or_default(),
            latitude,
            longitude,
        }),
        _ => Err(BridgeError::Api {
            service: "geolocation",
            message: "response carried no coordinates".to_string(),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct CalendarEnvelope {
    code: i64,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Value,
}

/// The feed answers HTTP 200 even for bad requests; the real verdict
/// is the body `code`. `data` is an array of days for calendar
/// requests but a single object for day requests, so both shapes are
/// accepted.
fn parse_calendar(body: &str) -> Result<Vec<PrayerDay>, BridgeError> {
    let envelope: CalendarEnvelope =
        serde_json::from_str(body).map_err(|source| BridgeError::Malformed {
            service: "prayer times",
            source,
        })?;

    if envelope.code != 200 {
        return Err(BridgeError::Api {
            service: "prayer times",
            message: envelope
                .status
                .unwrap_or_else(|| format!("code {}", envelope.code)),
        });
    }

    match serde_json::from_value::<Vec<PrayerDay>>(envelope.data.clone()) {
        Ok(days) => Ok(days),
        Err(_) => serde_json::from_value::<PrayerDay>(envelope.data)
            .map(|day| vec![day])
            .map_err(|source| BridgeError::Malformed {
                service: "prayer times",
                source,
            }),
    }
}
