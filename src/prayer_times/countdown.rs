//! Next-prayer countdown.
//!
//! [`compute`] derives everything the dashboard shows for one instant;
//! [`Countdown`] owns the single repeating 1 s timer that asks for it. Each
//! tick recomputes from the live clock, so a late or skipped tick never
//! accumulates drift.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::events::Event;
use crate::models::{PrayerDefinition, PrayerState, PRAYERS, PRAYER_COUNT};
use crate::notify::timers::{TimerDriver, TimerHandle};
use crate::prayer_times::clock::{millis_between, roll_over};
use crate::prayer_times::PrayerSchedule;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis: i64,
}

impl Remaining {
    pub fn from_millis(millis: i64) -> Self {
        Self {
            hours: millis / 3_600_000,
            minutes: (millis % 3_600_000) / 60_000,
            seconds: (millis % 60_000) / 1000,
            millis,
        }
    }

    /// `HH:MM:SS`, zero padded.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountdownTick {
    pub next_index: usize,
    pub next: &'static PrayerDefinition,
    pub remaining: Remaining,
    /// Elapsed share of the gap between the previous and next prayer, or
    /// `None` when the previous prayer has no time.
    pub progress: Option<f64>,
    pub states: [PrayerState; PRAYER_COUNT],
}

impl CountdownTick {
    pub fn progress_percent(&self) -> Option<f64> {
        self.progress.map(|p| p * 100.0)
    }
}

/// Countdown state for `now`, or `None` when the next prayer has no time.
pub fn compute(schedule: &PrayerSchedule, now: NaiveDateTime) -> Option<CountdownTick> {
    let next_index = schedule.next_prayer_index(now);
    let next_ts = schedule.resolve_index(next_index, now)?;

    let remaining = roll_over(millis_between(next_ts, now));

    let prev_index = PrayerSchedule::previous_index_of(next_index);
    let progress = schedule.resolve_index(prev_index, now).map(|prev_ts| {
        let span = roll_over(millis_between(next_ts, prev_ts));
        let elapsed = roll_over(millis_between(now, prev_ts));
        if span == 0 {
            1.0
        } else {
            (elapsed as f64 / span as f64).clamp(0.0, 1.0)
        }
    });

    Some(CountdownTick {
        next_index,
        next: &PRAYERS[next_index],
        remaining: Remaining::from_millis(remaining),
        progress,
        states: schedule.classify(now),
    })
}

/// Owner of the repeating tick timer. Starting again replaces the running
/// timer; there is never more than one.
#[derive(Debug, Default)]
pub struct Countdown {
    ticker: Option<TimerHandle>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, driver: &dyn TimerDriver) {
        self.stop();
        self.ticker = Some(driver.every(TICK_PERIOD, Event::Tick));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }
}
