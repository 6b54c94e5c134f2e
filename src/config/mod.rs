pub mod settings;

pub use settings::{AppConfig, BridgeConfig, CompassConfig, PrayerConfig};
