use serde::{Deserialize, Serialize};

use crate::models::PrayerKey;

/// One calendar day of prayer timings as delivered by the upstream API.
/// Immutable once fetched; extra wire fields are ignored on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerDay {
    pub date: DayDate,
    pub timings: Timings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayDate {
    pub gregorian: GregorianDate,
    pub hijri: HijriDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GregorianDate {
    /// `DD-MM-YYYY`, zero-padded. The cache is keyed on this exact
    /// string; any formatting drift upstream means a silent miss.
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HijriDate {
    pub day: String,
    pub month: HijriMonth,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HijriMonth {
    pub en: String,
}

impl HijriDate {
    /// "3 Ramadan 1446", with the upstream zero padding dropped from
    /// the day.
    pub fn label(&self) -> String {
        let day = self.day.trim_start_matches('0');
        format!("{} {} {}", day, self.month.en, self.year)
    }
}

/// The six timing strings, `"HH:MM"` with an optional trailing
/// timezone suffix such as `" (PKT)"`. Kept raw; parsing is the
/// resolver's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Timings {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl Timings {
    pub fn get(&self, key: PrayerKey) -> &str {
        match key {
            PrayerKey::Fajr => &self.fajr,
            PrayerKey::Sunrise => &self.sunrise,
            PrayerKey::Dhuhr => &self.dhuhr,
            PrayerKey::Asr => &self.asr,
            PrayerKey::Maghrib => &self.maghrib,
            PrayerKey::Isha => &self.isha,
        }
    }
}

/// Locally persisted batch of a month's worth of daily entries. Valid
/// only while `month`/`year` match the current date; replaced wholesale
/// on every successful fetch and cleared whenever the location changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCache {
    /// Zero-padded month, `"01"`..`"12"`.
    pub month: String,
    /// Four-digit year as a string.
    pub year: String,
    pub data: Vec<PrayerDay>,
}
