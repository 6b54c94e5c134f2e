pub mod resolver;
pub mod view;

pub use resolver::{
    CurrentPrayerPolicy, NextPrayerInfo, PrayerMoment, PreFajrPolicy, date_key, day_for_date,
    find_day, format_remaining, format_time, is_cache_valid, resolve_current_prayer,
    resolve_next_prayer, time_to_minutes,
};
pub use view::{GridCell, GridView, ScheduleCell, ScheduleView, build_grid_view, build_schedule_view};
