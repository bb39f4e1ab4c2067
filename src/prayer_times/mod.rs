pub mod calculator;
pub mod clock;
pub mod countdown;
pub mod schedule;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

pub use calculator::PrayerCalculator;
pub use countdown::{compute, Countdown, CountdownTick, Remaining};
pub use schedule::PrayerSchedule;

/// Where a day's timings come from. Asked once at start and again each
/// time the local date changes.
pub trait ScheduleSource {
    fn schedule_for(&self, date: NaiveDate) -> Result<PrayerSchedule>;
}

/// Timings read from an Aladhan-style JSON file, re-read for every date.
pub struct TimingsFile {
    pub path: PathBuf,
}

impl TimingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScheduleSource for TimingsFile {
    fn schedule_for(&self, date: NaiveDate) -> Result<PrayerSchedule> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Reading {:?}", self.path))?;
        let schedule = PrayerSchedule::from_timings_json(&content, date)
            .with_context(|| format!("Decoding {:?}", self.path))?;
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerKey;
    use std::io::Write;

    #[test]
    fn timings_file_is_dated_on_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Fajr": "05:00", "Isha": "19:50"}}"#).unwrap();
        let source = TimingsFile::new(file.path());
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let schedule = source.schedule_for(date).unwrap();
        assert_eq!(schedule.date, date);
        assert_eq!(schedule.display_time(PrayerKey::Isha), "19:50");
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = TimingsFile::new("/definitely/not/here.json");
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert!(source.schedule_for(date).is_err());
    }
}
