/// The six daily entries shown on the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrayerKey {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

pub const PRAYER_COUNT: usize = 6;

impl PrayerKey {
    pub const ALL: [PrayerKey; PRAYER_COUNT] = [
        PrayerKey::Fajr,
        PrayerKey::Sunrise,
        PrayerKey::Dhuhr,
        PrayerKey::Asr,
        PrayerKey::Maghrib,
        PrayerKey::Isha,
    ];

    /// Position in the fixed daily order.
    pub fn index(self) -> usize {
        match self {
            PrayerKey::Fajr => 0,
            PrayerKey::Sunrise => 1,
            PrayerKey::Dhuhr => 2,
            PrayerKey::Asr => 3,
            PrayerKey::Maghrib => 4,
            PrayerKey::Isha => 5,
        }
    }

    /// Canonical identifier, also used as the notification dedupe tag.
    pub fn as_str(self) -> &'static str {
        match self {
            PrayerKey::Fajr => "Fajr",
            PrayerKey::Sunrise => "Sunrise",
            PrayerKey::Dhuhr => "Dhuhr",
            PrayerKey::Asr => "Asr",
            PrayerKey::Maghrib => "Maghrib",
            PrayerKey::Isha => "Isha",
        }
    }

    pub fn definition(self) -> &'static PrayerDefinition {
        &PRAYERS[self.index()]
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PrayerDefinition {
    pub key: PrayerKey,
    pub name_local: &'static str,
    pub name_arabic: &'static str,
    pub icon: &'static str,
}

pub static PRAYERS: [PrayerDefinition; PRAYER_COUNT] = [
    PrayerDefinition {
        key: PrayerKey::Fajr,
        name_local: "Fajr",
        name_arabic: "الفجر",
        icon: "🌙",
    },
    PrayerDefinition {
        key: PrayerKey::Sunrise,
        name_local: "Chourouk",
        name_arabic: "الشروق",
        icon: "🌅",
    },
    PrayerDefinition {
        key: PrayerKey::Dhuhr,
        name_local: "Dhuhr",
        name_arabic: "الظهر",
        icon: "☀️",
    },
    PrayerDefinition {
        key: PrayerKey::Asr,
        name_local: "Asr",
        name_arabic: "العصر",
        icon: "🌤",
    },
    PrayerDefinition {
        key: PrayerKey::Maghrib,
        name_local: "Maghrib",
        name_arabic: "المغرب",
        icon: "🌇",
    },
    PrayerDefinition {
        key: PrayerKey::Isha,
        name_local: "Isha",
        name_arabic: "العشاء",
        icon: "🌑",
    },
];

/// Per-prayer display classification for one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrayerState {
    pub active: bool,
    pub passed: bool,
}
