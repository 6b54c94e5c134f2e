use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use mihrab::cli::args::{Cli, Commands};
use mihrab::cli::handlers;
use mihrab::config::AppConfig;
use mihrab::db::migrations::run_migrations;
use mihrab::tui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Times) => handlers::handle_times(&conn, &config)?,
        Some(Commands::Qibla) => handlers::handle_qibla(&conn)?,
        Some(Commands::Locate) => handlers::handle_locate(&conn, &config)?,
        Some(Commands::Search { query }) => handlers::handle_search(&config, &query)?,
        Some(Commands::City { action }) => handlers::handle_city(&conn, &config, &action)?,
        Some(Commands::Refresh) => handlers::handle_refresh(&conn, &config)?,

        // No subcommand → launch TUI
        None => tui::app::run(conn, config)?,
    }

    Ok(())
}
