mod cli;
mod config;
mod controller;
mod db;
mod error;
mod events;
mod models;
mod notify;
mod prayer_times;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = AppConfig::config_path()?;
    let mut config = AppConfig::load_from(&config_path).context("Loading config")?;

    if !config_path.exists() && !matches!(cli.command, Some(Commands::Setup { .. })) {
        eprintln!("No configuration found, using defaults. Run `alif setup --city <CITY> --lat <LAT> --lng <LNG>`.");
    }

    match cli.command {
        Some(Commands::Setup {
            city,
            lat,
            lng,
            method,
            madhab,
            tz,
            hijri_offset,
        }) => {
            handlers::handle_setup(
                &mut config,
                &city,
                lat,
                lng,
                method.as_deref(),
                madhab.as_deref(),
                tz.as_deref(),
                hijri_offset,
            )?;
        }
        Some(Commands::Times) => {
            let source = handlers::schedule_source(&config, cli.timings.as_deref())?;
            handlers::handle_times(&config, source.as_ref())?;
        }
        Some(Commands::Watch) => {
            let source = handlers::schedule_source(&config, cli.timings.as_deref())?;
            handlers::handle_watch(&config, source)?;
        }
        Some(Commands::Notify { action }) => {
            handlers::handle_notify(&mut config, &action)?;
        }
        Some(Commands::Ramadan { year, action }) => {
            let conn = open_db()?;
            handlers::handle_ramadan(&conn, year, action.as_ref())?;
        }

        // No subcommand → launch TUI
        None => {
            let conn = open_db()?;
            let source = handlers::schedule_source(&config, cli.timings.as_deref())?;
            tui::app::run(conn, config, Some(config_path), source)?;
        }
    }

    Ok(())
}

fn open_db() -> Result<Connection> {
    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;
    Ok(conn)
}
