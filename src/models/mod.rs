pub mod prayer;
pub mod ramadan;
pub mod tasbih;

pub use prayer::{PrayerDefinition, PrayerKey, PrayerState, PRAYERS, PRAYER_COUNT};
pub use ramadan::{RamadanLog, RAMADAN_DAYS};
pub use tasbih::{Tasbih, DHIKRS};
