use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names, French transliteration (index 0 = month 1)
const HIJRI_MONTHS_FR: &[&str] = &[
    "Mouharram",
    "Safar",
    "Rabi al-Awwal",
    "Rabi al-Thani",
    "Joumada al-Oula",
    "Joumada al-Thania",
    "Rajab",
    "Chaabane",
    "Ramadan",
    "Chawwal",
    "Dhou al-Qidah",
    "Dhou al-Hijjah",
];

const HIJRI_MONTHS_AR: &[&str] = &[
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الثاني",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

fn month_name(names: &[&'static str], month: usize) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| names.get(i))
        .copied()
        .unwrap_or("?")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HijriInfo {
    pub day: usize,
    pub month: usize,
    pub year: usize,
}

impl HijriInfo {
    pub fn local(&self) -> String {
        format!("{} {} {}", self.day, month_name(HIJRI_MONTHS_FR, self.month), self.year)
    }

    pub fn arabic(&self) -> String {
        format!("{} {} {}", self.day, month_name(HIJRI_MONTHS_AR, self.month), self.year)
    }

    pub fn is_ramadan(&self) -> bool {
        self.month == 9
    }
}

/// Hijri date for `date`, shifted by `offset_days` for local moon sighting.
pub fn to_hijri(date: NaiveDate, offset_days: i32) -> Result<HijriInfo> {
    let adjusted = date + Duration::days(offset_days as i64);
    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    Ok(HijriInfo {
        day: hd.day(),
        month: hd.month(),
        year: hd.year(),
    })
}

/// Header line for today: French then Arabic, or empty if conversion fails.
pub fn today_hijri_string(offset_days: i32) -> String {
    let today = chrono::Local::now().date_naive();
    match to_hijri(today, offset_days) {
        Ok(info) => format!("{}  ·  {}", info.local(), info.arabic()),
        Err(e) => {
            log::debug!("{e:#}");
            String::new()
        }
    }
}
