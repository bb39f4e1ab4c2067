pub mod dispatch;
pub mod preferences;
pub mod scheduler;
pub mod timers;

pub use dispatch::{deliver, DesktopNotifier, LogNotifier, Notifier};
pub use preferences::NotifPreferences;
pub use scheduler::{NotificationScheduler, PlannedNotification};
pub use timers::{ThreadTimers, TimerDriver, TimerHandle};

use crate::models::PrayerKey;

/// Whether the user allowed desktop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Not asked yet.
    Default,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn from_setting(setting: Option<bool>) -> Self {
        match setting {
            None => PermissionState::Default,
            Some(true) => PermissionState::Granted,
            Some(false) => PermissionState::Denied,
        }
    }

    pub fn as_setting(self) -> Option<bool> {
        match self {
            PermissionState::Default => None,
            PermissionState::Granted => Some(true),
            PermissionState::Denied => Some(false),
        }
    }

    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

/// Payload handed to the platform notifier when a prayer time arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerNotification {
    pub key: PrayerKey,
    pub title: String,
    pub body: String,
    /// Dedupe tag; the prayer key.
    pub tag: String,
}

impl PrayerNotification {
    pub fn for_prayer(key: PrayerKey, city: &str) -> Self {
        let def = key.definition();
        Self {
            key,
            title: format!("🕌 {} — {}", def.name_local, def.name_arabic),
            body: format!(
                "C'est l'heure de la prière de {} à {}. سبحان الله",
                def.name_local, city
            ),
            tag: key.as_str().to_string(),
        }
    }
}
