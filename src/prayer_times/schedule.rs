use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::AlifError;
use crate::models::{PrayerKey, PrayerState, PRAYER_COUNT};
use crate::prayer_times::clock::{parse_hh_mm, resolve_time_of_day};

const PLACEHOLDER: &str = "--:--";

/// One day's raw timings, keyed by prayer.
///
/// Entries are kept as the `"HH:MM"` text they arrived as and resolved
/// against the caller's clock on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerSchedule {
    pub date: NaiveDate,
    timings: HashMap<PrayerKey, String>,
}

#[derive(Deserialize)]
struct AladhanResponse {
    data: AladhanData,
}

#[derive(Deserialize)]
struct AladhanData {
    timings: HashMap<String, String>,
}

impl PrayerSchedule {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            timings: HashMap::new(),
        }
    }

    pub fn with(mut self, key: PrayerKey, raw: impl Into<String>) -> Self {
        self.set(key, raw);
        self
    }

    pub fn set(&mut self, key: PrayerKey, raw: impl Into<String>) {
        self.timings.insert(key, raw.into());
    }

    /// Build from a `{ "Fajr": "05:00", ... }` map. Unknown keys are dropped.
    pub fn from_timings<I, K, V>(date: NaiveDate, timings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut schedule = Self::new(date);
        for (name, raw) in timings {
            if let Some(key) = PrayerKey::ALL.iter().find(|k| k.as_str() == name.as_ref()) {
                schedule.set(*key, raw);
            }
        }
        schedule
    }

    /// Decode an Aladhan timings payload, either the full API response or
    /// the bare `timings` object.
    pub fn from_timings_json(json: &str, date: NaiveDate) -> Result<Self, AlifError> {
        let timings = match serde_json::from_str::<AladhanResponse>(json) {
            Ok(resp) => resp.data.timings,
            Err(_) => serde_json::from_str::<HashMap<String, String>>(json)?,
        };
        Ok(Self::from_timings(date, timings))
    }

    pub fn raw(&self, key: PrayerKey) -> Option<&str> {
        self.timings.get(&key).map(String::as_str)
    }

    /// Absolute timestamp of `key` on `now`'s calendar day.
    pub fn resolve(&self, key: PrayerKey, now: NaiveDateTime) -> Option<NaiveDateTime> {
        resolve_time_of_day(self.raw(key), now)
    }

    pub fn resolve_index(&self, index: usize, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.resolve(PrayerKey::ALL[index % PRAYER_COUNT], now)
    }

    /// First prayer strictly after `now`, or Fajr (0) when the day is over.
    pub fn next_prayer_index(&self, now: NaiveDateTime) -> usize {
        PrayerKey::ALL
            .iter()
            .position(|key| self.resolve(*key, now).is_some_and(|ts| ts > now))
            .unwrap_or(0)
    }

    pub fn is_passed(&self, key: PrayerKey, now: NaiveDateTime) -> bool {
        self.resolve(key, now).is_some_and(|ts| ts < now)
    }

    /// Prayer before `next`, wrapping to Isha before Fajr.
    pub fn previous_index_of(next: usize) -> usize {
        (next + PRAYER_COUNT - 1) % PRAYER_COUNT
    }

    /// Active/passed flags for every prayer from a single read of the next
    /// index. The active prayer is never reported as passed.
    pub fn classify(&self, now: NaiveDateTime) -> [PrayerState; PRAYER_COUNT] {
        let next = self.next_prayer_index(now);
        let mut states = [PrayerState::default(); PRAYER_COUNT];
        for (i, key) in PrayerKey::ALL.iter().enumerate() {
            let active = i == next;
            states[i] = PrayerState {
                active,
                passed: !active && self.is_passed(*key, now),
            };
        }
        states
    }

    /// `"HH:MM"` for display, `"--:--"` when the entry is missing or bad.
    pub fn display_time(&self, key: PrayerKey) -> String {
        self.raw(key)
            .and_then(parse_hh_mm)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn is_complete(&self) -> bool {
        PrayerKey::ALL
            .iter()
            .all(|key| self.raw(*key).and_then(parse_hh_mm).is_some())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    pub fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    pub fn sample() -> PrayerSchedule {
        PrayerSchedule::from_timings(
            day(),
            [
                ("Fajr", "05:00"),
                ("Sunrise", "06:30"),
                ("Dhuhr", "12:15"),
                ("Asr", "15:45"),
                ("Maghrib", "18:20"),
                ("Isha", "19:50"),
            ],
        )
    }

    #[test]
    fn next_prayer_in_the_evening_is_maghrib() {
        let schedule = sample();
        let next = schedule.next_prayer_index(at(18, 0));
        assert_eq!(next, PrayerKey::Maghrib.index());
        assert_eq!(PrayerSchedule::previous_index_of(next), PrayerKey::Asr.index());
    }

    #[test]
    fn next_prayer_wraps_to_fajr_after_isha() {
        assert_eq!(sample().next_prayer_index(at(23, 0)), 0);
    }

    #[test]
    fn next_prayer_is_strictly_after_now() {
        let schedule = sample();
        // exactly at Dhuhr, Dhuhr is no longer next
        assert_eq!(schedule.next_prayer_index(at(12, 15)), PrayerKey::Asr.index());
        for h in 0..24 {
            let now = at(h, 30);
            let idx = schedule.next_prayer_index(now);
            let ts = schedule.resolve_index(idx, now).unwrap();
            let all_passed = PrayerKey::ALL
                .iter()
                .all(|k| schedule.resolve(*k, now).unwrap() <= now);
            assert!(ts > now || (all_passed && idx == 0), "hour {h}");
        }
    }

    #[test]
    fn previous_index_wraps_to_isha() {
        assert_eq!(PrayerSchedule::previous_index_of(0), 5);
        assert_eq!(PrayerSchedule::previous_index_of(3), 2);
    }

    #[test]
    fn missing_entries_are_skipped_and_never_passed() {
        let schedule = PrayerSchedule::new(day())
            .with(PrayerKey::Asr, "15:45")
            .with(PrayerKey::Isha, "19:50");
        let now = at(16, 0);
        assert_eq!(schedule.next_prayer_index(now), PrayerKey::Isha.index());
        assert!(!schedule.is_passed(PrayerKey::Fajr, now));
        assert!(schedule.is_passed(PrayerKey::Asr, now));
        assert_eq!(schedule.display_time(PrayerKey::Fajr), "--:--");
        assert!(!schedule.is_complete());
    }

    #[test]
    fn classification_never_marks_active_as_passed() {
        let schedule = sample();
        // after Isha: Fajr is next (active) even though today's Fajr is past
        let states = schedule.classify(at(23, 0));
        assert!(states[0].active);
        assert!(!states[0].passed);
        assert!(states[1..].iter().all(|s| s.passed && !s.active));

        let states = schedule.classify(at(18, 0));
        assert!(states[4].active);
        assert_eq!(states.iter().filter(|s| s.passed).count(), 4);
        assert!(!states[5].passed);
    }

    #[test]
    fn decodes_full_aladhan_response() {
        let json = r#"{
            "code": 200,
            "data": {
                "timings": {
                    "Fajr": "05:00", "Sunrise": "06:30", "Dhuhr": "12:15",
                    "Asr": "15:45", "Sunset": "18:18", "Maghrib": "18:20",
                    "Isha": "19:50", "Imsak": "04:50", "Midnight": "00:05"
                }
            }
        }"#;
        let schedule = PrayerSchedule::from_timings_json(json, day()).unwrap();
        assert_eq!(schedule, sample());
    }

    #[test]
    fn decodes_bare_timings_object() {
        let schedule =
            PrayerSchedule::from_timings_json(r#"{"Fajr": "05:00 (CET)"}"#, day()).unwrap();
        assert_eq!(schedule.display_time(PrayerKey::Fajr), "05:00");
        assert_eq!(schedule.raw(PrayerKey::Dhuhr), None);
    }

    #[test]
    fn rejects_non_json() {
        assert!(PrayerSchedule::from_timings_json("not json", day()).is_err());
    }
}
