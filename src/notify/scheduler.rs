//! Arms one-shot notification timers for the rest of today.
//!
//! Every call to [`NotificationScheduler::reschedule`] cancels the whole
//! previous set before arming the new one, and bumps a generation number
//! carried by each timer's event. A timer that already fired into the
//! event queue before being cancelled is recognised as stale and dropped.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::events::Event;
use crate::models::PrayerKey;
use crate::notify::timers::{TimerDriver, TimerHandle};
use crate::notify::{NotifPreferences, PermissionState, PrayerNotification};
use crate::prayer_times::clock::millis_between;
use crate::prayer_times::PrayerSchedule;

/// A notification that would be armed, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedNotification {
    pub key: PrayerKey,
    pub fire_at: NaiveDateTime,
    pub delay_ms: i64,
}

#[derive(Debug, Default)]
pub struct NotificationScheduler {
    timers: Vec<TimerHandle>,
    generation: u64,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prayers still ahead today that are enabled and resolvable, in order.
    /// Empty unless permission is granted.
    pub fn plan(
        schedule: &PrayerSchedule,
        preferences: &NotifPreferences,
        permission: PermissionState,
        now: NaiveDateTime,
    ) -> Vec<PlannedNotification> {
        if !permission.is_granted() {
            return Vec::new();
        }

        PrayerKey::ALL
            .iter()
            .filter(|key| preferences.get(**key) != Some(false))
            .filter_map(|key| {
                let fire_at = schedule.resolve(*key, now)?;
                let delay_ms = millis_between(fire_at, now);
                (delay_ms > 0).then_some(PlannedNotification {
                    key: *key,
                    fire_at,
                    delay_ms,
                })
            })
            .collect()
    }

    /// Replace every pending timer with a fresh set. Returns how many were
    /// armed.
    pub fn reschedule(
        &mut self,
        schedule: Option<&PrayerSchedule>,
        preferences: &NotifPreferences,
        permission: PermissionState,
        city: &str,
        now: NaiveDateTime,
        driver: &dyn TimerDriver,
    ) -> usize {
        self.cancel_all();
        self.generation += 1;

        let Some(schedule) = schedule else {
            log::debug!("No schedule loaded, nothing to arm");
            return 0;
        };

        for planned in Self::plan(schedule, preferences, permission, now) {
            log::debug!(
                "Arming {} at {} (in {} ms)",
                planned.key.as_str(),
                planned.fire_at.format("%H:%M"),
                planned.delay_ms
            );
            let event = Event::NotificationDue {
                generation: self.generation,
                notification: PrayerNotification::for_prayer(planned.key, city),
            };
            let delay = Duration::from_millis(planned.delay_ms as u64);
            self.timers.push(driver.once(delay, event));
        }

        log::info!(
            "Notifications rescheduled: {} armed ({:?})",
            self.timers.len(),
            permission
        );
        self.timers.len()
    }

    pub fn armed(&self) -> usize {
        self.timers.len()
    }

    /// Whether a fired timer belongs to the current set.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn cancel_all(&mut self) {
        for handle in self.timers.drain(..) {
            handle.cancel();
        }
    }
}
