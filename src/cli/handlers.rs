use anyhow::{Result, anyhow};
use chrono::{Datelike, Days, Local, NaiveDate, Timelike};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};

use crate::bridge::{Companion, HttpBridge};
use crate::cli::args::CityCommands;
use crate::config::AppConfig;
use crate::db::store;
use crate::models::{Location, MonthlyCache, PrayerKey};
use crate::qibla::{direction_label, qibla_bearing};
use crate::schedule::{build_grid_view, build_schedule_view, day_for_date, is_cache_valid, time_to_minutes};
use crate::utils::format::coord_label;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

#[allow(unused_macros)]
macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(conn: &Connection, config: &AppConfig) -> Result<()> {
    let bridge = HttpBridge::new(&config.bridge)?;
    let today = Local::now().date_naive();
    let now = Local::now().time();
    let now_minutes = (now.hour() * 60 + now.minute()) as i32;

    let location = ensure_location(conn, &bridge, config)?;
    let cache = ensure_cache(conn, &bridge, &location, today)?;

    let Some(entry) = day_for_date(&cache, today) else {
        println_colored!(RED, "  No data for today");
        return Ok(());
    };
    let tomorrow = today
        .checked_add_days(Days::new(1))
        .and_then(|d| day_for_date(&cache, d));

    let view = build_schedule_view(&location.city, entry, tomorrow, now_minutes);
    let grid = build_grid_view(entry, tomorrow, now_minutes, config.current_prayer_policy());

    println!();
    println_colored!(GOLD, "  Prayer Times — {}", view.city);
    println_colored!(DIM, "  {} · {}", view.gregorian, view.hijri);
    println!();

    for cell in &grid.cells {
        let past = time_to_minutes(entry.timings.get(key_of(cell.label)))
            .is_some_and(|t| t <= now_minutes);
        if cell.active {
            println_colored!(GOLD, "  ▸ {:<9} {}", cell.label, cell.time);
        } else if past {
            println_colored!(DIM, "    {:<9} {}", cell.label, cell.time);
        } else {
            println_colored!(BOLD, "    {:<9} {}", cell.label, cell.time);
        }
    }

    if let Some(summary) = &grid.summary {
        println!();
        println_colored!(AMBER, "  Next: {}", summary);
    }
    if let Some(countdown) = &view.countdown {
        println_colored!(AMBER, "  {}", countdown);
    }
    println!();
    Ok(())
}

fn key_of(label: &str) -> PrayerKey {
    PrayerKey::ALL
        .into_iter()
        .find(|k| k.as_str() == label)
        .unwrap_or(PrayerKey::Fajr)
}

// ─── Qibla ───────────────────────────────────────────────────────────────────

pub fn handle_qibla(conn: &Connection) -> Result<()> {
    let Some(location) = store::load_location(conn)? else {
        println_colored!(RED, "  No location data.");
        println_colored!(DIM, "  Run 'mihrab locate' or 'mihrab city add <name>' first.");
        return Ok(());
    };

    let bearing = qibla_bearing(location.latitude, location.longitude);
    println!();
    println_colored!(GOLD, "  Qibla — {}", location.city);
    println!();
    println_colored!(BOLD, "  {}° {}", bearing.round() as i64, direction_label(bearing));
    println_colored!(
        DIM,
        "  from {}",
        coord_label(location.latitude, location.longitude)
    );
    println!();
    Ok(())
}

// ─── Locate ──────────────────────────────────────────────────────────────────

pub fn handle_locate(conn: &Connection, config: &AppConfig) -> Result<()> {
    let bridge = HttpBridge::new(&config.bridge)?;
    println_colored!(DIM, "  Detecting location...");

    let fix = bridge
        .locate()
        .map_err(|e| anyhow!("Location detection failed: {}", e))?;

    let detected = located(&fix, config);
    match store::load_location(conn)? {
        Some(existing) if existing.same_city(&detected) => {
            println_colored!(GREEN, "  ✓ Still in {}, keeping cached times", existing.city);
        }
        _ => {
            store::activate_city(conn, &detected)?;
            println_colored!(GREEN, "  ✓ Location set to {}, {}", detected.city, detected.country);
            println_colored!(DIM, "  Times will be fetched on next use.");
        }
    }
    Ok(())
}

fn located(fix: &crate::bridge::GeoFix, config: &AppConfig) -> Location {
    let mut location = Location::new(&fix.city, &fix.country, fix.latitude, fix.longitude);
    location.method = config.prayer.method;
    location
}

// ─── Search ──────────────────────────────────────────────────────────────────

pub fn handle_search(config: &AppConfig, query: &str) -> Result<()> {
    let hits = search_cities(config, query)?;
    if hits.is_empty() {
        return Ok(());
    }
    println!();
    for (i, hit) in hits.iter().enumerate() {
        println!(
            "  {}. {}, {}  {}",
            i + 1,
            hit.name,
            hit.country,
            coord_label(hit.latitude, hit.longitude)
        );
    }
    println!();
    Ok(())
}

fn search_cities(config: &AppConfig, query: &str) -> Result<Vec<crate::bridge::CityHit>> {
    if query.trim().chars().count() < 2 {
        println_colored!(AMBER, "  Enter at least 2 letters");
        return Ok(vec![]);
    }

    let bridge = HttpBridge::new(&config.bridge)?;
    println_colored!(DIM, "  Searching...");
    let hits = bridge
        .search_city(query.trim())
        .map_err(|e| anyhow!("Search failed: {}", e))?;

    if hits.is_empty() {
        println_colored!(AMBER, "  City not found. Try again.");
    }
    Ok(hits)
}

// ─── City management ─────────────────────────────────────────────────────────

pub fn handle_city(conn: &Connection, config: &AppConfig, action: &CityCommands) -> Result<()> {
    match action {
        CityCommands::List => {
            let cities = store::load_cities(conn)?;
            let active = store::load_active_city(conn)?;
            println!();
            if cities.is_empty() {
                println_colored!(DIM, "  No saved cities. Use 'mihrab city add <name>'.");
            } else {
                for city in &cities {
                    let is_active = active
                        .as_ref()
                        .is_some_and(|a| a.city.eq_ignore_ascii_case(&city.city));
                    let marker = if is_active { "✓" } else { " " };
                    let line = format!(
                        "  {} {}, {}  {}",
                        marker,
                        city.city,
                        city.country,
                        coord_label(city.latitude, city.longitude)
                    );
                    if is_active {
                        println_colored!(GOLD, "{}", line);
                    } else {
                        println!("{}", line);
                    }
                }
            }
            println!();
        }

        CityCommands::Add { query, pick } => {
            let hits = search_cities(config, query)?;
            if hits.is_empty() {
                return Ok(());
            }

            let choice = match pick {
                Some(n) => *n,
                None if hits.len() == 1 => 1,
                None => {
                    println!();
                    for (i, hit) in hits.iter().enumerate() {
                        println!("  {}. {}, {}", i + 1, hit.name, hit.country);
                    }
                    println!();
                    prompt("  Pick a number: ")?.trim().parse().unwrap_or(0)
                }
            };
            let Some(hit) = choice.checked_sub(1).and_then(|i| hits.get(i)) else {
                return Err(anyhow!("No result number {}", choice));
            };

            let mut chosen = hit.clone().into_location();
            chosen.method = config.prayer.method;

            let mut cities = store::load_cities(conn)?;
            if cities.iter().any(|c| c.same_city(&chosen)) {
                println_colored!(AMBER, "  {} is already saved", chosen.city);
            } else {
                cities.push(chosen.clone());
                store::save_cities(conn, &cities)?;
                println_colored!(GREEN, "  ✓ {} added!", chosen.city);
            }
            store::activate_city(conn, &chosen)?;
            println_colored!(DIM, "  Now active. Times will be fetched on next use.");
        }

        CityCommands::Set { name } => {
            let cities = store::load_cities(conn)?;
            let Some(city) = cities
                .iter()
                .find(|c| c.city.eq_ignore_ascii_case(name.trim()))
            else {
                let names: Vec<&str> = cities.iter().map(|c| c.city.as_str()).collect();
                return Err(anyhow!(
                    "'{}' is not a saved city. Saved: {}",
                    name,
                    if names.is_empty() { "none".to_string() } else { names.join(", ") }
                ));
            };
            store::activate_city(conn, city)?;
            println_colored!(GREEN, "  ✓ Switched to {}", city.city);
            println_colored!(DIM, "  Times will be fetched on next use.");
        }
    }
    Ok(())
}

// ─── Refresh ─────────────────────────────────────────────────────────────────

pub fn handle_refresh(conn: &Connection, config: &AppConfig) -> Result<()> {
    let bridge = HttpBridge::new(&config.bridge)?;
    let Some(location) = store::load_location(conn)? else {
        println_colored!(RED, "  No location data.");
        println_colored!(DIM, "  Run 'mihrab locate' or 'mihrab city add <name>' first.");
        return Ok(());
    };

    let today = Local::now().date_naive();
    println_colored!(DIM, "  Loading prayer times...");
    let cache = bridge
        .fetch_month(&location, today.year(), today.month())
        .map_err(|e| anyhow!("Failed to load data: {}", e))?;
    let days = cache.data.len();
    store::save_cache(conn, &cache)?;

    println_colored!(
        GREEN,
        "  ✓ Cached {} days for {} ({})",
        days,
        today.format("%B %Y"),
        location.city
    );
    Ok(())
}

// ─── Shared flows ────────────────────────────────────────────────────────────

/// Saved location, or a fresh network detection when nothing is saved.
fn ensure_location(conn: &Connection, bridge: &dyn Companion, config: &AppConfig) -> Result<Location> {
    if let Some(location) = store::load_location(conn)? {
        return Ok(location);
    }
    println_colored!(DIM, "  Detecting location...");
    let fix = bridge
        .locate()
        .map_err(|e| anyhow!("Location detection failed: {}", e))?;
    let location = located(&fix, config);
    store::activate_city(conn, &location)?;
    Ok(location)
}

/// Cached month if still current, otherwise a blocking refetch.
fn ensure_cache(
    conn: &Connection,
    bridge: &dyn Companion,
    location: &Location,
    today: NaiveDate,
) -> Result<MonthlyCache> {
    if let Some(cache) = store::load_cache(conn)? {
        if is_cache_valid(Some(&cache), today) {
            return Ok(cache);
        }
    }
    println_colored!(DIM, "  Loading prayer times...");
    let cache = bridge
        .fetch_month(location, today.year(), today.month())
        .map_err(|e| anyhow!("Failed to load data: {}", e))?;
    store::save_cache(conn, &cache)?;
    Ok(cache)
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
