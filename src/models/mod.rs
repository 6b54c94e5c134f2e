pub mod compass;
pub mod location;
pub mod prayer;
pub mod prayer_day;

pub use compass::CompassSample;
pub use location::Location;
pub use prayer::PrayerKey;
pub use prayer_day::{DayDate, GregorianDate, HijriDate, HijriMonth, MonthlyCache, PrayerDay, Timings};
