use std::fmt;

/// The six daily events in their fixed order. Sunrise is a marker, not
/// a prayed prayer; whether it participates in "current prayer"
/// windowing depends on the view policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerKey {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerKey {
    pub const ALL: [PrayerKey; 6] = [
        PrayerKey::Fajr,
        PrayerKey::Sunrise,
        PrayerKey::Dhuhr,
        PrayerKey::Asr,
        PrayerKey::Maghrib,
        PrayerKey::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerKey::Fajr => "Fajr",
            PrayerKey::Sunrise => "Sunrise",
            PrayerKey::Dhuhr => "Dhuhr",
            PrayerKey::Asr => "Asr",
            PrayerKey::Maghrib => "Maghrib",
            PrayerKey::Isha => "Isha",
        }
    }

    /// Position within the fixed sequence.
    pub fn index(&self) -> usize {
        PrayerKey::ALL.iter().position(|k| k == self).unwrap_or(0)
    }
}

impl fmt::Display for PrayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
