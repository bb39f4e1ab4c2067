use std::collections::HashMap;

use crate::models::PrayerKey;

/// Per-prayer notification switches. A missing entry means the user has not
/// decided yet.
#[derive(Debug, Clone, Default)]
pub struct NotifPreferences {
    enabled: HashMap<PrayerKey, bool>,
}

impl NotifPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: PrayerKey) -> Option<bool> {
        self.enabled.get(&key).copied()
    }

    /// Only an explicit `false` turns a prayer off.
    pub fn shows_enabled(&self, key: PrayerKey) -> bool {
        self.get(key) != Some(false)
    }

    /// Flip one prayer; an undecided prayer becomes enabled.
    pub fn toggle(&mut self, key: PrayerKey) -> bool {
        let now_on = !self.get(key).unwrap_or(false);
        self.enabled.insert(key, now_on);
        now_on
    }

    pub fn set(&mut self, key: PrayerKey, on: bool) {
        self.enabled.insert(key, on);
    }

    /// Permission was already granted at start: default the rest to on.
    pub fn enable_undecided(&mut self) {
        for key in PrayerKey::ALL {
            self.enabled.entry(key).or_insert(true);
        }
    }

    /// Permission was just granted.
    pub fn enable_all(&mut self) {
        for key in PrayerKey::ALL {
            self.enabled.insert(key, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undecided_shows_enabled() {
        let prefs = NotifPreferences::new();
        assert_eq!(prefs.get(PrayerKey::Asr), None);
        assert!(prefs.shows_enabled(PrayerKey::Asr));
    }

    #[test]
    fn toggle_from_undecided_turns_on_then_off() {
        let mut prefs = NotifPreferences::new();
        assert!(prefs.toggle(PrayerKey::Dhuhr));
        assert!(!prefs.toggle(PrayerKey::Dhuhr));
        assert!(!prefs.shows_enabled(PrayerKey::Dhuhr));
    }

    #[test]
    fn enable_undecided_keeps_explicit_choices() {
        let mut prefs = NotifPreferences::new();
        prefs.set(PrayerKey::Isha, false);
        prefs.enable_undecided();
        assert_eq!(prefs.get(PrayerKey::Isha), Some(false));
        assert_eq!(prefs.get(PrayerKey::Fajr), Some(true));
    }

    #[test]
    fn enable_all_overrides_everything() {
        let mut prefs = NotifPreferences::new();
        prefs.set(PrayerKey::Isha, false);
        prefs.enable_all();
        assert!(PrayerKey::ALL.iter().all(|k| prefs.get(*k) == Some(true)));
    }
}
