use anyhow::{anyhow, Result};
use chrono::{FixedOffset, Local, NaiveDate};
use salah::prelude::{
    Configuration, Coordinates, Madhab, Method, Prayer, PrayerSchedule as SalahSchedule,
};

use crate::config::LocationConfig;
use crate::error::AlifError;
use crate::models::PrayerKey;
use crate::prayer_times::{PrayerSchedule, ScheduleSource};

/// Offline timings for a fixed location.
pub struct PrayerCalculator {
    pub lat: f64,
    pub lng: f64,
    method_str: String,
    madhab_str: String,
    /// Explicit UTC offset; `None` follows the device clock, DST included.
    offset: Option<FixedOffset>,
}

impl PrayerCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: Option<i32>,
    ) -> Result<Self, AlifError> {
        // Validate method + madhab early
        parse_method(method)?;
        parse_madhab(madhab)?;
        let offset = tz_offset_minutes
            .map(|minutes| {
                FixedOffset::east_opt(minutes * 60).ok_or(AlifError::InvalidOffset(minutes))
            })
            .transpose()?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            offset,
        })
    }

    pub fn from_config(location: &LocationConfig) -> Result<Self, AlifError> {
        Self::new(
            location.latitude,
            location.longitude,
            &location.calc_method,
            &location.madhab,
            location.timezone_offset,
        )
    }

    /// `"HH:MM"` timings for `date`, in the configured offset or else the
    /// device's local time for that date.
    pub fn schedule_for_date(&self, date: NaiveDate) -> Result<PrayerSchedule> {
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = SalahSchedule::new()
            .on(date)
            .for_location(Coordinates::new(self.lat, self.lng))
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let local = |prayer: Prayer| -> String {
            let utc = times.time(prayer);
            match &self.offset {
                Some(offset) => utc.with_timezone(offset).format("%H:%M").to_string(),
                None => utc.with_timezone(&Local).format("%H:%M").to_string(),
            }
        };

        Ok(PrayerSchedule::new(date)
            .with(PrayerKey::Fajr, local(Prayer::Fajr))
            .with(PrayerKey::Sunrise, local(Prayer::Sunrise))
            .with(PrayerKey::Dhuhr, local(Prayer::Dhuhr))
            .with(PrayerKey::Asr, local(Prayer::Asr))
            .with(PrayerKey::Maghrib, local(Prayer::Maghrib))
            .with(PrayerKey::Isha, local(Prayer::Isha)))
    }
}

impl ScheduleSource for PrayerCalculator {
    fn schedule_for(&self, date: NaiveDate) -> Result<PrayerSchedule> {
        self.schedule_for_date(date)
    }
}

fn parse_method(s: &str) -> Result<Method, AlifError> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(AlifError::UnknownMethod(s.to_string())),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab, AlifError> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(AlifError::UnknownMadhab(s.to_string())),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];
