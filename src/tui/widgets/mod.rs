pub mod cities;
pub mod header;
pub mod next_prayer;
pub mod prayer_grid;
pub mod qibla;
pub mod schedule;
pub mod statusbar;
