//! Prayer times and qibla compass companion.
//!
//! The library split exists so integration tests can drive the
//! schedule resolver, compass engine, store, and bridge without going
//! through the binary.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod qibla;
pub mod schedule;
pub mod sensors;
pub mod tui;
pub mod utils;

pub use bridge::{BridgeError, CityHit, Companion, GeoFix, HttpBridge};
pub use config::AppConfig;
pub use models::{CompassSample, Location, MonthlyCache, PrayerDay, PrayerKey};
pub use qibla::{CompassState, DisplayMetrics, QiblaEngine, QiblaSession, qibla_bearing};
pub use schedule::{CurrentPrayerPolicy, PreFajrPolicy};
pub use sensors::{Haptics, HeadingSource, MockCompass, MockHaptics, SimulatedCompass};
