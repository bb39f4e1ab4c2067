use crate::error::AlifError;

pub const RAMADAN_DAYS: usize = 30;

/// Fasting log for one Ramadan, one flag per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamadanLog {
    pub year: i32,
    pub days: Vec<bool>,
}

impl RamadanLog {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            days: vec![false; RAMADAN_DAYS],
        }
    }

    /// Build from stored flags, padding or truncating to 30 days.
    pub fn from_days(year: i32, mut days: Vec<bool>) -> Self {
        days.resize(RAMADAN_DAYS, false);
        Self { year, days }
    }

    /// Flip day `day` (1-based). Returns the new value.
    pub fn toggle(&mut self, day: u32) -> Result<bool, AlifError> {
        let slot = (day as usize)
            .checked_sub(1)
            .and_then(|i| self.days.get_mut(i))
            .ok_or(AlifError::InvalidRamadanDay(day))?;
        *slot = !*slot;
        Ok(*slot)
    }

    pub fn is_fasted(&self, day: u32) -> bool {
        (day as usize)
            .checked_sub(1)
            .and_then(|i| self.days.get(i))
            .copied()
            .unwrap_or(false)
    }

    pub fn fasted_count(&self) -> usize {
        self.days.iter().filter(|d| **d).count()
    }

    pub fn progress_percent(&self) -> u16 {
        ((self.fasted_count() as f64 / RAMADAN_DAYS as f64) * 100.0).round() as u16
    }
}
