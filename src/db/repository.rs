use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::RamadanLog;

// ─── Ramadan repo ────────────────────────────────────────────────────────────

/// One row per year; the day flags are read and written as a whole.
pub struct RamadanRepo;

impl RamadanRepo {
    pub fn load(conn: &Connection, year: i32) -> Result<RamadanLog> {
        let stored: Option<String> = conn
            .query_row(
                "SELECT days FROM ramadan_log WHERE year = ?1",
                params![year],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            None => Ok(RamadanLog::new(year)),
            Some(json) => {
                let days: Vec<bool> = serde_json::from_str(&json)
                    .with_context(|| format!("Decoding Ramadan log for {}", year))?;
                Ok(RamadanLog::from_days(year, days))
            }
        }
    }

    pub fn save(conn: &Connection, log: &RamadanLog) -> Result<()> {
        let json = serde_json::to_string(&log.days)?;
        conn.execute(
            "INSERT INTO ramadan_log (year, days, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(year) DO UPDATE SET days = excluded.days, updated_at = excluded.updated_at",
            params![log.year, json],
        )?;
        Ok(())
    }

    /// Flip one day and persist the year. Returns the updated log.
    pub fn toggle_day(conn: &Connection, year: i32, day: u32) -> Result<RamadanLog> {
        let mut ramadan = Self::load(conn, year)?;
        let fasted = ramadan.toggle(day)?;
        Self::save(conn, &ramadan)?;
        log::debug!("Ramadan {} day {} -> {}", year, day, fasted);
        Ok(ramadan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn unknown_year_is_empty() {
        let log = RamadanRepo::load(&conn(), 2026).unwrap();
        assert_eq!(log.fasted_count(), 0);
    }

    #[test]
    fn toggles_persist_per_year() {
        let conn = conn();
        RamadanRepo::toggle_day(&conn, 2026, 3).unwrap();
        RamadanRepo::toggle_day(&conn, 2026, 4).unwrap();
        RamadanRepo::toggle_day(&conn, 2025, 4).unwrap();
        RamadanRepo::toggle_day(&conn, 2026, 4).unwrap();

        let this_year = RamadanRepo::load(&conn, 2026).unwrap();
        assert!(this_year.is_fasted(3));
        assert!(!this_year.is_fasted(4));
        assert_eq!(RamadanRepo::load(&conn, 2025).unwrap().fasted_count(), 1);
    }

    #[test]
    fn invalid_day_is_rejected_and_not_saved() {
        let conn = conn();
        assert!(RamadanRepo::toggle_day(&conn, 2026, 31).is_err());
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM ramadan_log", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn file_backed_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alif.db");
        {
            let conn = Connection::open(&path).unwrap();
            run_migrations(&conn).unwrap();
            RamadanRepo::toggle_day(&conn, 2026, 27).unwrap();
        }
        let conn = Connection::open(&path).unwrap();
        assert!(RamadanRepo::load(&conn, 2026).unwrap().is_fasted(27));
    }
}
