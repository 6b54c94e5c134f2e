//! Pure schedule resolution over a cached month of prayer times.
//!
//! Everything here is a function of its arguments; clocks, storage and
//! rendering live with the callers. They load the cache and pass the
//! current date/time in, and malformed data degrades (`None`, `"--:--"`)
//! instead of erroring so the caller can branch to a "no data" state.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{MonthlyCache, PrayerDay, PrayerKey, Timings};

pub const MINUTES_PER_DAY: i32 = 24 * 60;

// ─── Cache lookup ────────────────────────────────────────────────────────────

/// Cache key for a calendar day: `DD-MM-YYYY`, zero-padded.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// A cache is usable only for the month it was fetched in. Crossing a
/// month (or year) boundary invalidates it wholesale, even for days the
/// fetched range would still cover.
pub fn is_cache_valid(cache: Option<&MonthlyCache>, date: NaiveDate) -> bool {
    match cache {
        None => false,
        Some(c) => c.month == format!("{:02}", date.month()) && c.year == date.year().to_string(),
    }
}

/// Linear scan by exact string equality. A missing day is a normal
/// outcome, not an error. No normalization: an upstream entry with
/// different padding silently never matches.
pub fn find_day<'a>(cache: &'a MonthlyCache, date_str: &str) -> Option<&'a PrayerDay> {
    cache.data.iter().find(|d| d.date.gregorian.date == date_str)
}

/// Month-guarded lookup for an arbitrary date (used for both today and
/// tomorrow; tomorrow misses whenever it falls in the next month).
pub fn day_for_date<'a>(cache: &'a MonthlyCache, date: NaiveDate) -> Option<&'a PrayerDay> {
    if !is_cache_valid(Some(cache), date) {
        return None;
    }
    find_day(cache, &date_key(date))
}

// ─── Timing strings ──────────────────────────────────────────────────────────

/// Strips a parenthesized timezone suffix and surrounding whitespace.
/// `"--:--"` stands in for missing input. No timezone math happens
/// anywhere; the upstream API already serves local time.
pub fn format_time(raw: Option<&str>) -> String {
    let Some(s) = raw else {
        return "--:--".to_string();
    };
    if s.is_empty() {
        return "--:--".to_string();
    }
    let cut = s.find('(').map(|i| &s[..i]).unwrap_or(s);
    cut.trim().to_string()
}

/// Minutes since midnight, or `None` for anything unparseable. `None`
/// loses every ordering comparison below, so a malformed entry can
/// never become "next" or "current".
pub fn time_to_minutes(raw: &str) -> Option<i32> {
    let cleaned = format_time(Some(raw));
    let (h, m) = cleaned.split_once(':')?;
    let h: i32 = h.trim().parse().ok()?;
    let m: i32 = m.trim().parse().ok()?;
    Some(h * 60 + m)
}

// ─── Next prayer ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PrayerMoment {
    pub key: PrayerKey,
    pub minutes: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NextPrayerInfo {
    /// 0..=5 for a same-day event; `PrayerKey::ALL.len()` when every
    /// event has passed and the next is tomorrow's Fajr.
    pub next_index: usize,
    pub next: PrayerMoment,
    pub prev: Option<PrayerMoment>,
    pub is_next_day: bool,
}

/// First event in fixed order strictly after `now_minutes`. An event at
/// exactly the current minute counts as current, not next. Past Isha
/// the result is a synthetic next-day Fajr offset by a full day; when
/// tomorrow's entry is unavailable, today's Fajr minutes stand in as a
/// degraded estimate rather than an error.
pub fn resolve_next_prayer(
    today: &Timings,
    now_minutes: i32,
    tomorrow: Option<&Timings>,
) -> NextPrayerInfo {
    let moments: Vec<PrayerMoment> = PrayerKey::ALL
        .iter()
        .map(|&key| PrayerMoment {
            key,
            minutes: time_to_minutes(today.get(key)),
        })
        .collect();

    for (i, moment) in moments.iter().enumerate() {
        if let Some(mins) = moment.minutes {
            if now_minutes < mins {
                return NextPrayerInfo {
                    next_index: i,
                    next: moment.clone(),
                    prev: (i > 0).then(|| moments[i - 1].clone()),
                    is_next_day: false,
                };
            }
        }
    }

    let base = tomorrow
        .and_then(|t| time_to_minutes(&t.fajr))
        .or(moments[0].minutes);

    NextPrayerInfo {
        next_index: PrayerKey::ALL.len(),
        next: PrayerMoment {
            key: PrayerKey::Fajr,
            minutes: base.map(|b| b + MINUTES_PER_DAY),
        },
        prev: moments.last().cloned(),
        is_next_day: true,
    }
}

// ─── Current prayer ──────────────────────────────────────────────────────────

/// What the grid highlights before Fajr. Screens genuinely disagree
/// here, so the choice is a policy, not a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreFajrPolicy {
    /// The previous day's Isha is still the active cell.
    WrapToIsha,
    /// The upcoming Fajr is highlighted instead.
    UpcomingFajr,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentPrayerPolicy {
    pub pre_fajr: PreFajrPolicy,
    /// When true, Sunrise owns the window up to Dhuhr. When false
    /// (the grid-widget behavior), Fajr's window ends at Sunrise and
    /// the forenoon gap highlights the upcoming Dhuhr.
    pub sunrise_window: bool,
}

impl Default for CurrentPrayerPolicy {
    fn default() -> Self {
        Self {
            pre_fajr: PreFajrPolicy::WrapToIsha,
            sunrise_window: false,
        }
    }
}

/// The cell to mark active in a grid view at `now_minutes`.
pub fn resolve_current_prayer(
    today: &Timings,
    now_minutes: i32,
    policy: CurrentPrayerPolicy,
) -> PrayerKey {
    let pre_fajr = match policy.pre_fajr {
        PreFajrPolicy::WrapToIsha => PrayerKey::Isha,
        PreFajrPolicy::UpcomingFajr => PrayerKey::Fajr,
    };

    if policy.sunrise_window {
        // Reverse scan: last event whose start has passed.
        for &key in PrayerKey::ALL.iter().rev() {
            if let Some(start) = time_to_minutes(today.get(key)) {
                if start <= now_minutes {
                    return key;
                }
            }
        }
        return pre_fajr;
    }

    let before = |raw: &str| time_to_minutes(raw).is_some_and(|t| now_minutes < t);

    if before(&today.fajr) {
        pre_fajr
    } else if before(&today.sunrise) {
        PrayerKey::Fajr
    } else if before(&today.dhuhr) {
        PrayerKey::Dhuhr
    } else if before(&today.asr) {
        PrayerKey::Dhuhr
    } else if before(&today.maghrib) {
        PrayerKey::Asr
    } else if before(&today.isha) {
        PrayerKey::Maghrib
    } else {
        PrayerKey::Isha
    }
}

// ─── Countdown formatting ────────────────────────────────────────────────────

/// `"45m"`, `"2h"`, `"2h 15m"`; minutes are omitted when exactly zero.
pub fn format_remaining(total_minutes: i32) -> String {
    if total_minutes < 60 {
        return format!("{}m", total_minutes);
    }
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if minutes == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}
