//! Single owner of the live prayer state.
//!
//! The TUI and the headless watcher both drive one [`Controller`]: they feed
//! it events from the loop and clock readings, and it keeps the countdown
//! timer, the notification timers and the day's schedule consistent.

use chrono::NaiveDateTime;

use crate::models::PrayerKey;
use crate::notify::{
    deliver, NotifPreferences, NotificationScheduler, Notifier, PermissionState,
    PlannedNotification, PrayerNotification, TimerDriver,
};
use crate::prayer_times::{compute, Countdown, CountdownTick, PrayerSchedule, ScheduleSource};

/// Seconds between attempts to load timings while none are loaded.
const RETRY_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The preference flipped to this value and timers were re-armed.
    Toggled(bool),
    /// Notifications are not allowed yet; ask the user first.
    NeedsPermission,
}

pub struct Controller<D: TimerDriver> {
    schedule: Option<PrayerSchedule>,
    last_fetch: Option<NaiveDateTime>,
    preferences: NotifPreferences,
    permission: PermissionState,
    city: String,
    countdown: Countdown,
    scheduler: NotificationScheduler,
    source: Box<dyn ScheduleSource>,
    notifier: Box<dyn Notifier>,
    driver: D,
}

impl<D: TimerDriver> Controller<D> {
    pub fn new(
        source: Box<dyn ScheduleSource>,
        notifier: Box<dyn Notifier>,
        driver: D,
        permission: PermissionState,
        city: impl Into<String>,
    ) -> Self {
        let mut preferences = NotifPreferences::new();
        if permission.is_granted() {
            preferences.enable_undecided();
        }
        Self {
            schedule: None,
            last_fetch: None,
            preferences,
            permission,
            city: city.into(),
            countdown: Countdown::new(),
            scheduler: NotificationScheduler::new(),
            source,
            notifier,
            driver,
        }
    }

    /// Load today's timings and start the 1 s countdown.
    pub fn start(&mut self, now: NaiveDateTime) {
        self.fetch_day(now);
        self.countdown.start(&self.driver);
    }

    pub fn stop(&mut self) {
        self.countdown.stop();
    }

    pub fn load_schedule(&mut self, schedule: PrayerSchedule, now: NaiveDateTime) {
        log::info!(
            "Schedule loaded for {} ({})",
            schedule.date,
            if schedule.is_complete() { "complete" } else { "partial" }
        );
        self.schedule = Some(schedule);
        self.reschedule(now);
    }

    /// Countdown state for `now`. Pulls a new schedule first when the
    /// local date moved past the loaded one, or, at most once a minute,
    /// when the last load failed.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<CountdownTick> {
        match self.schedule.as_ref().map(|s| s.date) {
            Some(date) if date != now.date() => {
                log::info!("Local date changed to {}, refreshing timings", now.date());
                self.fetch_day(now);
            }
            None if self.retry_due(now) => {
                log::info!("Retrying timings for {}", now.date());
                self.fetch_day(now);
            }
            _ => {}
        }
        compute(self.schedule.as_ref()?, now)
    }

    pub fn toggle_notification(&mut self, key: PrayerKey, now: NaiveDateTime) -> ToggleOutcome {
        if !self.permission.is_granted() {
            return ToggleOutcome::NeedsPermission;
        }
        let on = self.preferences.toggle(key);
        log::info!("Notifications for {} {}", key.as_str(), if on { "on" } else { "off" });
        self.reschedule(now);
        ToggleOutcome::Toggled(on)
    }

    pub fn set_permission(&mut self, permission: PermissionState, now: NaiveDateTime) {
        let newly_granted = permission.is_granted() && !self.permission.is_granted();
        self.permission = permission;
        if newly_granted {
            self.preferences.enable_all();
        }
        self.reschedule(now);
    }

    /// A notification timer fired. Returns whether it was delivered.
    pub fn on_notification_due(&self, generation: u64, notification: &PrayerNotification) -> bool {
        if !self.scheduler.is_current(generation) {
            log::debug!("Dropping stale notification for {}", notification.tag);
            return false;
        }
        deliver(self.notifier.as_ref(), notification);
        true
    }

    pub fn planned(&self, now: NaiveDateTime) -> Vec<PlannedNotification> {
        match &self.schedule {
            Some(schedule) => {
                NotificationScheduler::plan(schedule, &self.preferences, self.permission, now)
            }
            None => Vec::new(),
        }
    }

    pub fn schedule(&self) -> Option<&PrayerSchedule> {
        self.schedule.as_ref()
    }

    pub fn preferences(&self) -> &NotifPreferences {
        &self.preferences
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn armed(&self) -> usize {
        self.scheduler.armed()
    }

    fn retry_due(&self, now: NaiveDateTime) -> bool {
        self.last_fetch
            .is_none_or(|last| (now - last).num_seconds().abs() >= RETRY_SECS)
    }

    fn fetch_day(&mut self, now: NaiveDateTime) {
        self.last_fetch = Some(now);
        match self.source.schedule_for(now.date()) {
            Ok(schedule) => self.load_schedule(schedule, now),
            Err(e) => {
                log::warn!("Could not load timings for {}: {e:#}", now.date());
                self.schedule = None;
                self.reschedule(now);
            }
        }
    }

    fn reschedule(&mut self, now: NaiveDateTime) {
        self.scheduler.reschedule(
            self.schedule.as_ref(),
            &self.preferences,
            self.permission,
            &self.city,
            now,
            &self.driver,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::notify::timers::testing::RecordingTimers;
    use crate::prayer_times::schedule::tests::{at, day, sample};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Fixed;

    impl ScheduleSource for Fixed {
        fn schedule_for(&self, date: NaiveDate) -> Result<PrayerSchedule> {
            let base = sample();
            let mut schedule = PrayerSchedule::new(date);
            for key in PrayerKey::ALL {
                schedule.set(key, base.raw(key).unwrap());
            }
            Ok(schedule)
        }
    }

    struct Unreachable;

    impl ScheduleSource for Unreachable {
        fn schedule_for(&self, _: NaiveDate) -> Result<PrayerSchedule> {
            anyhow::bail!("offline")
        }
    }

    /// Counts calls (from 1) and fails those `fails` selects.
    struct Flaky {
        calls: Rc<Cell<u32>>,
        fails: fn(u32) -> bool,
    }

    impl ScheduleSource for Flaky {
        fn schedule_for(&self, date: NaiveDate) -> Result<PrayerSchedule> {
            self.calls.set(self.calls.get() + 1);
            if (self.fails)(self.calls.get()) {
                anyhow::bail!("timings unavailable");
            }
            Fixed.schedule_for(date)
        }
    }

    fn flaky(fails: fn(u32) -> bool) -> (Controller<RecordingTimers>, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let c = Controller::new(
            Box::new(Flaky {
                calls: calls.clone(),
                fails,
            }),
            Box::new(Recorder::default()),
            RecordingTimers::default(),
            PermissionState::Granted,
            "Lyon",
        );
        (c, calls)
    }

    fn seconds_after(start: NaiveDateTime, secs: i64) -> NaiveDateTime {
        start + chrono::Duration::seconds(secs)
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Notifier for Recorder {
        fn show(&self, n: &PrayerNotification) -> Result<()> {
            self.0.borrow_mut().push(n.tag.clone());
            Ok(())
        }
    }

    fn controller(permission: PermissionState) -> (Controller<RecordingTimers>, Recorder) {
        let recorder = Recorder::default();
        let c = Controller::new(
            Box::new(Fixed),
            Box::new(recorder.clone()),
            RecordingTimers::default(),
            permission,
            "Lyon",
        );
        (c, recorder)
    }

    fn live_notifications(c: &Controller<RecordingTimers>) -> usize {
        c.driver
            .armed
            .borrow()
            .iter()
            .filter(|a| !a.is_cancelled() && !a.repeating)
            .count()
    }

    #[test]
    fn start_loads_schedule_arms_timers_and_ticks() {
        let (mut c, _) = controller(PermissionState::Granted);
        c.start(at(13, 0));
        assert!(c.countdown.is_running());
        assert_eq!(c.armed(), 3);
        assert_eq!(live_notifications(&c), 3);
        let tick = c.tick(at(13, 0)).unwrap();
        assert_eq!(tick.next.key, PrayerKey::Asr);
    }

    #[test]
    fn toggle_without_permission_asks_for_it() {
        let (mut c, _) = controller(PermissionState::Default);
        c.start(at(4, 0));
        assert_eq!(
            c.toggle_notification(PrayerKey::Dhuhr, at(4, 0)),
            ToggleOutcome::NeedsPermission
        );
        assert_eq!(c.armed(), 0);
    }

    #[test]
    fn granting_permission_enables_all_and_arms() {
        let (mut c, _) = controller(PermissionState::Default);
        c.start(at(4, 0));
        c.set_permission(PermissionState::Granted, at(4, 0));
        assert!(PrayerKey::ALL.iter().all(|k| c.preferences().get(*k) == Some(true)));
        assert_eq!(c.armed(), 6);
    }

    #[test]
    fn toggle_rearms_the_whole_set() {
        let (mut c, _) = controller(PermissionState::Granted);
        c.start(at(4, 0));
        assert_eq!(
            c.toggle_notification(PrayerKey::Dhuhr, at(4, 0)),
            ToggleOutcome::Toggled(false)
        );
        assert_eq!(c.armed(), 5);
        assert_eq!(live_notifications(&c), 5);
        assert!(c.planned(at(4, 0)).iter().all(|p| p.key != PrayerKey::Dhuhr));
    }

    #[test]
    fn denying_disarms_everything() {
        let (mut c, _) = controller(PermissionState::Granted);
        c.start(at(4, 0));
        c.set_permission(PermissionState::Denied, at(4, 0));
        assert_eq!(c.armed(), 0);
        assert_eq!(live_notifications(&c), 0);
    }

    #[test]
    fn stale_generation_is_not_delivered() {
        let (mut c, recorder) = controller(PermissionState::Granted);
        c.start(at(4, 0));
        let (stale_gen, stale) = match &c.driver.armed.borrow()[0].event {
            Event::NotificationDue {
                generation,
                notification,
            } => (*generation, notification.clone()),
            other => panic!("unexpected {other:?}"),
        };
        c.toggle_notification(PrayerKey::Isha, at(4, 0));
        assert!(!c.on_notification_due(stale_gen, &stale));
        assert!(recorder.0.borrow().is_empty());

        let current = c
            .driver
            .armed
            .borrow()
            .iter()
            .rev()
            .find_map(|a| match &a.event {
                Event::NotificationDue {
                    generation,
                    notification,
                } if !a.is_cancelled() => Some((*generation, notification.clone())),
                _ => None,
            })
            .unwrap();
        assert!(c.on_notification_due(current.0, &current.1));
        assert_eq!(recorder.0.borrow().len(), 1);
    }

    #[test]
    fn new_day_reloads_and_rearms() {
        let (mut c, _) = controller(PermissionState::Granted);
        c.start(at(23, 0));
        assert_eq!(c.armed(), 0);
        let tomorrow = day().succ_opt().unwrap().and_hms_opt(0, 30, 0).unwrap();
        let tick = c.tick(tomorrow).unwrap();
        assert_eq!(c.schedule().unwrap().date, tomorrow.date());
        assert_eq!(tick.next.key, PrayerKey::Fajr);
        assert_eq!(c.armed(), 6);
    }

    #[test]
    fn source_failure_leaves_no_schedule() {
        let mut c = Controller::new(
            Box::new(Unreachable),
            Box::new(Recorder::default()),
            RecordingTimers::default(),
            PermissionState::Granted,
            "Lyon",
        );
        c.start(at(4, 0));
        assert!(c.schedule().is_none());
        assert!(c.tick(at(4, 0)).is_none());
        assert_eq!(c.armed(), 0);
        assert!(c.countdown.is_running());
    }

    #[test]
    fn failed_load_is_retried_after_a_minute() {
        let (mut c, calls) = flaky(|call| call == 1);
        c.start(at(4, 0));
        assert!(c.schedule().is_none());

        for secs in 1..60 {
            assert!(c.tick(seconds_after(at(4, 0), secs)).is_none());
        }
        assert_eq!(calls.get(), 1);

        let tick = c.tick(seconds_after(at(4, 0), 60)).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(tick.next.key, PrayerKey::Fajr);
        assert_eq!(c.armed(), 6);
    }

    #[test]
    fn persistent_failure_is_retried_once_per_minute() {
        let (mut c, calls) = flaky(|_| true);
        c.start(at(4, 0));
        for secs in 1..=180 {
            c.tick(seconds_after(at(4, 0), secs));
        }
        assert_eq!(calls.get(), 4);
        assert_eq!(c.armed(), 0);
    }

    #[test]
    fn failed_rollover_recovers() {
        let (mut c, calls) = flaky(|call| call == 2);
        c.start(at(23, 0));
        let midnight = day().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert!(c.tick(midnight).is_none());
        assert_eq!(calls.get(), 2);

        assert!(c.tick(seconds_after(midnight, 30)).is_none());
        assert_eq!(calls.get(), 2);

        c.tick(seconds_after(midnight, 60)).unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(c.schedule().unwrap().date, midnight.date());
        assert_eq!(c.armed(), 6);
    }
}
