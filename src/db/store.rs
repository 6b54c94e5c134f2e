//! Key-value state store backing the app: active location, the monthly
//! prayer cache, and the saved-city list, each serialized as JSON under
//! a fixed key.
//!
//! Reads are tolerant by contract: a malformed value is logged and
//! treated as absent, never an error, so a bad cache can always be
//! recovered from by refetching.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{Location, MonthlyCache};

pub const KEY_LOCATION: &str = "location";
pub const KEY_PRAYER_DATA: &str = "prayerData";
pub const KEY_CITIES: &str = "cities";
pub const KEY_ACTIVE_CITY: &str = "activeCity";

// ─── Raw key-value access ────────────────────────────────────────────────────

pub struct StateRepo;

impl StateRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        let value = conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(conn: &Connection, key: &str) -> Result<()> {
        conn.execute("DELETE FROM app_state WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ─── Typed accessors ─────────────────────────────────────────────────────────

fn get_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let Some(raw) = StateRepo::get(conn, key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("discarding malformed state under '{}': {}", key, e);
            Ok(None)
        }
    }
}

fn set_json<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    StateRepo::set(conn, key, &serde_json::to_string(value)?)
}

pub fn load_location(conn: &Connection) -> Result<Option<Location>> {
    get_json(conn, KEY_LOCATION)
}

pub fn save_location(conn: &Connection, location: &Location) -> Result<()> {
    set_json(conn, KEY_LOCATION, location)
}

pub fn load_cache(conn: &Connection) -> Result<Option<MonthlyCache>> {
    get_json(conn, KEY_PRAYER_DATA)
}

pub fn save_cache(conn: &Connection, cache: &MonthlyCache) -> Result<()> {
    set_json(conn, KEY_PRAYER_DATA, cache)
}

pub fn clear_cache(conn: &Connection) -> Result<()> {
    StateRepo::remove(conn, KEY_PRAYER_DATA)
}

pub fn load_cities(conn: &Connection) -> Result<Vec<Location>> {
    Ok(get_json(conn, KEY_CITIES)?.unwrap_or_default())
}

pub fn save_cities(conn: &Connection, cities: &[Location]) -> Result<()> {
    set_json(conn, KEY_CITIES, &cities)
}

/// The full record of the selected city, not just its name; the city
/// list reads `.city` for its checkmark.
pub fn load_active_city(conn: &Connection) -> Result<Option<Location>> {
    get_json(conn, KEY_ACTIVE_CITY)
}

pub fn save_active_city(conn: &Connection, location: &Location) -> Result<()> {
    set_json(conn, KEY_ACTIVE_CITY, location)
}

/// Make `location` the live location. The old month of timings belongs
/// to the old coordinates, so it is dropped in the same breath; the
/// next refresh fills it back in.
pub fn activate_city(conn: &Connection, location: &Location) -> Result<()> {
    save_location(conn, location)?;
    save_active_city(conn, location)?;
    clear_cache(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{DayDate, GregorianDate, HijriDate, HijriMonth, PrayerDay, Timings};

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_cache() -> MonthlyCache {
        MonthlyCache {
            month: "04".into(),
            year: "2025".into(),
            data: vec![PrayerDay {
                date: DayDate {
                    gregorian: GregorianDate { date: "15-04-2025".into() },
                    hijri: HijriDate {
                        day: "17".into(),
                        month: HijriMonth { en: "Shawwal".into() },
                        year: "1446".into(),
                    },
                },
                timings: Timings {
                    fajr: "05:00".into(),
                    sunrise: "06:30".into(),
                    dhuhr: "12:15".into(),
                    asr: "15:45".into(),
                    maghrib: "18:20".into(),
                    isha: "19:50".into(),
                },
            }],
        }
    }

    #[test]
    fn test_set_get_remove_round_trip() {
        let conn = conn();
        assert_eq!(StateRepo::get(&conn, "k").unwrap(), None);

        StateRepo::set(&conn, "k", "v1").unwrap();
        assert_eq!(StateRepo::get(&conn, "k").unwrap().as_deref(), Some("v1"));

        StateRepo::set(&conn, "k", "v2").unwrap();
        assert_eq!(StateRepo::get(&conn, "k").unwrap().as_deref(), Some("v2"));

        StateRepo::remove(&conn, "k").unwrap();
        assert_eq!(StateRepo::get(&conn, "k").unwrap(), None);
    }

    #[test]
    fn test_location_round_trip() {
        let conn = conn();
        let loc = Location::new("Lahore", "Pakistan", 31.5497, 74.3436);

        save_location(&conn, &loc).unwrap();
        let loaded = load_location(&conn).unwrap().unwrap();
        assert_eq!(loaded.city, "Lahore");
        assert_eq!(loaded.method, 3);
    }

    #[test]
    fn test_malformed_json_reads_as_absent() {
        let conn = conn();
        StateRepo::set(&conn, KEY_LOCATION, "{not json").unwrap();
        StateRepo::set(&conn, KEY_PRAYER_DATA, "[1, 2, 3]").unwrap();
        StateRepo::set(&conn, KEY_CITIES, "\"just a string\"").unwrap();
        // A bare name under activeCity predates the JSON record shape.
        StateRepo::set(&conn, KEY_ACTIVE_CITY, "Lahore").unwrap();

        assert!(load_location(&conn).unwrap().is_none());
        assert!(load_cache(&conn).unwrap().is_none());
        assert!(load_cities(&conn).unwrap().is_empty());
        assert!(load_active_city(&conn).unwrap().is_none());
    }

    #[test]
    fn test_cache_round_trip() {
        let conn = conn();
        save_cache(&conn, &sample_cache()).unwrap();

        let loaded = load_cache(&conn).unwrap().unwrap();
        assert_eq!(loaded.month, "04");
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].timings.maghrib, "18:20");

        clear_cache(&conn).unwrap();
        assert!(load_cache(&conn).unwrap().is_none());
    }

    #[test]
    fn test_activate_city_swaps_location_and_drops_cache() {
        let conn = conn();
        save_cache(&conn, &sample_cache()).unwrap();

        let casa = Location::new("Casablanca", "Morocco", 33.5731, -7.5898);
        activate_city(&conn, &casa).unwrap();

        assert_eq!(load_location(&conn).unwrap().unwrap().city, "Casablanca");
        assert!(load_cache(&conn).unwrap().is_none());

        // activeCity holds the whole record, not just the name.
        let active = load_active_city(&conn).unwrap().unwrap();
        assert_eq!(active.city, "Casablanca");
        assert_eq!(active.longitude, -7.5898);
        let raw = StateRepo::get(&conn, KEY_ACTIVE_CITY).unwrap().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok(), "stored as JSON");
    }

    #[test]
    fn test_cities_list_round_trip() {
        let conn = conn();
        assert!(load_cities(&conn).unwrap().is_empty());

        let cities = vec![
            Location::new("Lahore", "Pakistan", 31.5497, 74.3436),
            Location::new("Istanbul", "Turkey", 41.0082, 28.9784),
        ];
        save_cities(&conn, &cities).unwrap();

        let loaded = load_cities(&conn).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].city, "Istanbul");
    }
}
