use anyhow::Result;
use notify_rust::Notification;

use crate::notify::PrayerNotification;

pub trait Notifier {
    fn show(&self, notification: &PrayerNotification) -> Result<()>;
}

/// Desktop notification through the platform's notification service.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn show(&self, notification: &PrayerNotification) -> Result<()> {
        Notification::new()
            .summary(&notification.title)
            .body(&notification.body)
            .appname("alif")
            .icon("alarm-clock")
            .show()?;
        Ok(())
    }
}

/// Writes the notification to the log only.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, notification: &PrayerNotification) -> Result<()> {
        log::info!("{} | {}", notification.title, notification.body);
        Ok(())
    }
}

/// Fire and forget: a failed notification is logged and dropped.
pub fn deliver(notifier: &dyn Notifier, notification: &PrayerNotification) {
    match notifier.show(notification) {
        Ok(()) => log::info!("Notified {}", notification.tag),
        Err(e) => log::debug!("Notification for {} failed: {e:#}", notification.tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerKey;
    use std::cell::Cell;

    struct Failing(Cell<u32>);

    impl Notifier for Failing {
        fn show(&self, _: &PrayerNotification) -> Result<()> {
            self.0.set(self.0.get() + 1);
            anyhow::bail!("no notification daemon")
        }
    }

    #[test]
    fn failures_are_swallowed_and_not_retried() {
        let notifier = Failing(Cell::new(0));
        deliver(&notifier, &PrayerNotification::for_prayer(PrayerKey::Fajr, "Lyon"));
        assert_eq!(notifier.0.get(), 1);
    }
}
