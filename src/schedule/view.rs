//! Render-ready projections of a resolved schedule.
//!
//! Widgets draw these verbatim; all decisions about what a cell says
//! happen here, against plain minutes, so the rules stay testable
//! without a terminal.

use crate::models::{PrayerDay, PrayerKey};
use crate::schedule::resolver::{
    self, CurrentPrayerPolicy, NextPrayerInfo, format_time, resolve_current_prayer,
    resolve_next_prayer,
};
use crate::utils::format::countdown_label;

// ─── Home schedule ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleCell {
    pub label: &'static str,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleView {
    pub city: String,
    pub hijri: String,
    pub gregorian: String,
    pub next_label: &'static str,
    pub next_time: String,
    /// Only set inside the final hour ("In 1 minute" / "In N minutes").
    pub countdown: Option<String>,
    pub cells: Vec<ScheduleCell>,
}

/// Builds the home view: the next prayer front and center, then the
/// rest of today's events, spilling into tomorrow when today is spent.
pub fn build_schedule_view(
    city: &str,
    today: &PrayerDay,
    tomorrow: Option<&PrayerDay>,
    now_minutes: i32,
) -> ScheduleView {
    let info = resolve_next_prayer(&today.timings, now_minutes, tomorrow.map(|d| &d.timings));

    let next_time = if info.is_next_day {
        let source = tomorrow.unwrap_or(today);
        format_time(Some(&source.timings.fajr))
    } else {
        format_time(Some(today.timings.get(info.next.key)))
    };

    let countdown = info
        .next
        .minutes
        .map(|m| m - now_minutes)
        .filter(|&rem| rem > 0 && rem <= 60)
        .map(countdown_label);

    ScheduleView {
        city: city.to_string(),
        hijri: today.date.hijri.label(),
        gregorian: today.date.gregorian.date.clone(),
        next_label: info.next.key.as_str(),
        next_time,
        countdown,
        cells: upcoming_cells(&info, today, tomorrow),
    }
}

/// The list below the headline. After the next event come today's
/// remaining ones; once the day runs out (or the next is already
/// tomorrow's Fajr), tomorrow's Fajr and Sunrise take over so the list
/// never dead-ends right before midnight.
fn upcoming_cells(
    info: &NextPrayerInfo,
    today: &PrayerDay,
    tomorrow: Option<&PrayerDay>,
) -> Vec<ScheduleCell> {
    let mut cells = Vec::new();

    if info.is_next_day {
        if let Some(t) = tomorrow {
            cells.push(cell(PrayerKey::Fajr, &t.timings.fajr));
            cells.push(cell(PrayerKey::Sunrise, &t.timings.sunrise));
        }
        return cells;
    }

    for &key in &PrayerKey::ALL[info.next_index + 1..] {
        cells.push(cell(key, today.timings.get(key)));
    }

    if info.next.key == PrayerKey::Isha {
        if let Some(t) = tomorrow {
            cells.push(cell(PrayerKey::Fajr, &t.timings.fajr));
            cells.push(cell(PrayerKey::Sunrise, &t.timings.sunrise));
        }
    }

    cells
}

fn cell(key: PrayerKey, raw: &str) -> ScheduleCell {
    ScheduleCell {
        label: key.as_str(),
        time: format_time(Some(raw)),
    }
}

// ─── Day grid ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub label: &'static str,
    pub time: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// "Asr in 2h 15m". Absent when no timing parses.
    pub summary: Option<String>,
    /// Final hour before the next event.
    pub urgent: bool,
    pub cells: Vec<GridCell>,
}

/// All six events at a glance, the active one marked per `policy`.
pub fn build_grid_view(
    today: &PrayerDay,
    tomorrow: Option<&PrayerDay>,
    now_minutes: i32,
    policy: CurrentPrayerPolicy,
) -> GridView {
    let info = resolve_next_prayer(&today.timings, now_minutes, tomorrow.map(|d| &d.timings));
    let remaining = info.next.minutes.map(|m| m - now_minutes);

    let summary = remaining
        .map(|rem| format!("{} in {}", info.next.key.as_str(), resolver::format_remaining(rem)));
    let urgent = remaining.is_some_and(|rem| rem <= 60);

    let active = resolve_current_prayer(&today.timings, now_minutes, policy);
    let cells = PrayerKey::ALL
        .iter()
        .map(|&key| GridCell {
            label: key.as_str(),
            time: format_time(Some(today.timings.get(key))),
            active: key == active,
        })
        .collect();

    GridView { summary, urgent, cells }
}
