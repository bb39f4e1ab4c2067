use anyhow::{Context, Result};
use chrono::Datelike;
use rusqlite::Connection;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::args::{NotifyCommands, RamadanCommands};
use crate::config::AppConfig;
use crate::controller::Controller;
use crate::db::repository::RamadanRepo;
use crate::events::{Event, EventHandler};
use crate::models::{RamadanLog, PRAYERS, RAMADAN_DAYS};
use crate::notify::{
    DesktopNotifier, LogNotifier, NotifPreferences, NotificationScheduler, Notifier,
    PermissionState, ThreadTimers,
};
use crate::prayer_times::clock::local_now;
use crate::prayer_times::{compute, PrayerCalculator, ScheduleSource, TimingsFile};
use crate::utils::format::{format_remaining, pad_display, progress_bar};
use crate::utils::hijri::today_hijri_string;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Wiring ──────────────────────────────────────────────────────────────────

/// Timings come from a JSON file when one is given, otherwise from the
/// offline calculator for the configured location.
pub fn schedule_source(config: &AppConfig, timings: Option<&Path>) -> Result<Box<dyn ScheduleSource>> {
    match timings {
        Some(path) => Ok(Box::new(TimingsFile::new(path))),
        None => {
            let calc = PrayerCalculator::from_config(&config.location)
                .context("Invalid location settings, run `alif setup`")?;
            Ok(Box::new(calc))
        }
    }
}

pub fn notifier(config: &AppConfig) -> Box<dyn Notifier> {
    if config.notifications.log_only {
        Box::new(LogNotifier)
    } else {
        Box::new(DesktopNotifier)
    }
}

// ─── Setup ───────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn handle_setup(
    config: &mut AppConfig,
    city: &str,
    lat: f64,
    lng: f64,
    method: Option<&str>,
    madhab: Option<&str>,
    tz: Option<&str>,
    hijri_offset: Option<i32>,
) -> Result<()> {
    let mut location = config.location.clone();
    location.city = city.to_string();
    location.latitude = lat;
    location.longitude = lng;
    if let Some(method) = method {
        location.calc_method = method.to_string();
    }
    if let Some(madhab) = madhab {
        location.madhab = madhab.to_string();
    }
    match tz {
        Some("local") => location.timezone_offset = None,
        Some(tz) => {
            location.timezone_offset = Some(
                parse_tz_offset(tz).with_context(|| format!("Invalid UTC offset '{}'", tz))?,
            );
        }
        None => {}
    }
    if let Some(offset) = hijri_offset {
        location.hijri_offset = offset;
    }

    // Reject bad method/madhab/offset before writing anything
    PrayerCalculator::from_config(&location)?;

    config.location = location;
    config.save()?;

    println_colored!(GREEN, "  ✓ Saved settings for {}", config.location.city);
    println_colored!(
        DIM,
        "  {:.4}, {:.4}  ·  {} / {}  ·  {}",
        config.location.latitude,
        config.location.longitude,
        config.location.calc_method,
        config.location.madhab,
        match config.location.timezone_offset {
            Some(minutes) => format!("UTC{}", format_tz_offset(minutes)),
            None => "device time".to_string(),
        }
    );
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(config: &AppConfig, source: &dyn ScheduleSource) -> Result<()> {
    let now = local_now();
    let schedule = source.schedule_for(now.date())?;
    let permission = PermissionState::from_setting(config.notifications.permission);

    println!();
    println_colored!(
        GOLD,
        "  Prayer Times — {} ({})",
        config.location.city,
        now.date().format("%Y-%m-%d")
    );
    let hijri = today_hijri_string(config.location.hijri_offset);
    if !hijri.is_empty() {
        println_colored!(DIM, "  {}", hijri);
    }
    println!();

    let states = schedule.classify(now);
    for (def, state) in PRAYERS.iter().zip(states.iter()) {
        let label = pad_display(&format!("{} {}", def.icon, def.name_local), 14);
        let arabic = if config.display.show_arabic { def.name_arabic } else { "" };
        let time = schedule.display_time(def.key);
        if state.active {
            println_colored!(AMBER, "▸ {}{}  {}", label, time, arabic);
        } else if state.passed {
            println_colored!(DIM, "  {}{}  {}", label, time, arabic);
        } else {
            println_colored!(BOLD, "  {}{}  {}", label, time, arabic);
        }
    }

    if let Some(tick) = compute(&schedule, now) {
        println!();
        println_colored!(
            AMBER,
            "  Next: {} — {} in {}  ({})",
            tick.next.name_local,
            tick.next.name_arabic,
            format_remaining(&tick.remaining),
            tick.remaining.clock()
        );
        if let Some(progress) = tick.progress {
            println_colored!(
                DIM,
                "  {} {:.0}%",
                progress_bar(progress, 24),
                progress * 100.0
            );
        }
    }

    println!();
    match permission {
        PermissionState::Granted => {
            let mut prefs = NotifPreferences::new();
            prefs.enable_undecided();
            let plan = NotificationScheduler::plan(&schedule, &prefs, permission, now);
            if plan.is_empty() {
                println_colored!(DIM, "  No more notifications today");
            } else {
                let names: Vec<_> = plan
                    .iter()
                    .map(|p| format!("{} {}", p.key.definition().name_local, p.fire_at.format("%H:%M")))
                    .collect();
                println_colored!(DIM, "  Notifications: {}", names.join(", "));
            }
        }
        PermissionState::Default => {
            println_colored!(DIM, "  Notifications off — `alif notify grant` to enable");
        }
        PermissionState::Denied => {
            println_colored!(DIM, "  Notifications blocked");
        }
    }
    println!();
    Ok(())
}

// ─── Watch ───────────────────────────────────────────────────────────────────

pub fn handle_watch(config: &AppConfig, source: Box<dyn ScheduleSource>) -> Result<()> {
    let permission = PermissionState::from_setting(config.notifications.permission);
    if !permission.is_granted() {
        println_colored!(
            AMBER,
            "  Notifications are not allowed — run `alif notify grant` first"
        );
    }

    let events = EventHandler::new();
    let timers = ThreadTimers::new(events.sender());
    let mut controller = Controller::new(
        source,
        notifier(config),
        timers,
        permission,
        config.location.city.clone(),
    );
    controller.start(local_now());
    println_colored!(
        GOLD,
        "  Watching prayer times for {} ({} notifications armed)",
        controller.city(),
        controller.armed()
    );
    for planned in controller.planned(local_now()) {
        println_colored!(
            DIM,
            "    {} {}",
            planned.fire_at.format("%H:%M"),
            planned.key.definition().name_local
        );
    }

    loop {
        match events.next()? {
            Event::Tick => {
                let status = match controller.tick(local_now()) {
                    Some(tick) => format!(
                        "  {} {} in {}",
                        tick.next.icon,
                        tick.next.name_local,
                        tick.remaining.clock()
                    ),
                    None => "  Waiting for timings…".to_string(),
                };
                print!("\r{}\x1b[K", status);
                io::stdout().flush()?;
            }
            Event::NotificationDue {
                generation,
                notification,
            } => {
                if controller.on_notification_due(generation, &notification) {
                    println!();
                    println_colored!(GREEN, "  🕌 {}", notification.title);
                }
            }
            Event::Key(_) => {}
        }
    }
}

// ─── Notify ──────────────────────────────────────────────────────────────────

pub fn handle_notify(config: &mut AppConfig, action: &NotifyCommands) -> Result<()> {
    let state = match action {
        NotifyCommands::Grant => PermissionState::Granted,
        NotifyCommands::Deny => PermissionState::Denied,
        NotifyCommands::Reset => PermissionState::Default,
    };
    config.notifications.permission = state.as_setting();
    config.save()?;
    match state {
        PermissionState::Granted => println_colored!(GREEN, "  ✓ Notifications allowed"),
        PermissionState::Denied => println_colored!(AMBER, "  Notifications blocked"),
        PermissionState::Default => println_colored!(DIM, "  Notification permission reset"),
    }
    Ok(())
}

// ─── Ramadan ─────────────────────────────────────────────────────────────────

pub fn handle_ramadan(
    conn: &Connection,
    year: Option<i32>,
    action: Option<&RamadanCommands>,
) -> Result<()> {
    let year = year.unwrap_or_else(|| local_now().year());
    let ramadan = match action {
        Some(RamadanCommands::Toggle { day }) => {
            let ramadan = RamadanRepo::toggle_day(conn, year, *day)?;
            if ramadan.is_fasted(*day) {
                println_colored!(GREEN, "  ✓ Day {} marked as fasted", day);
            } else {
                println_colored!(DIM, "  ○ Day {} unmarked", day);
            }
            ramadan
        }
        Some(RamadanCommands::Show) | None => RamadanRepo::load(conn, year)?,
    };
    print_ramadan(&ramadan);
    Ok(())
}

fn print_ramadan(ramadan: &RamadanLog) {
    println!();
    println_colored!(
        GOLD,
        "  Ramadan {}  ·  {} / {} days",
        ramadan.year,
        ramadan.fasted_count(),
        RAMADAN_DAYS
    );
    println!();
    for week in (1..=RAMADAN_DAYS as u32).collect::<Vec<_>>().chunks(10) {
        print!("  ");
        for day in week {
            if ramadan.is_fasted(*day) {
                print!("{}{:>3}\x1b[0m ", GREEN, day);
            } else {
                print!("{}{:>3}\x1b[0m ", DIM, day);
            }
        }
        println!();
    }
    println!();
    println_colored!(
        DIM,
        "  {} {}%",
        progress_bar(ramadan.fasted_count() as f64 / RAMADAN_DAYS as f64, 30),
        ramadan.progress_percent()
    );
    println!();
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Parse a UTC offset string into total minutes.
/// Accepts: "5:30", "+5:30", "-5:30", "5", "+5", "5.5"
fn parse_tz_offset(s: &str) -> Result<i32> {
    let s = s.trim_start_matches('+');
    let negative = s.starts_with('-');
    let s = s.trim_start_matches('-');
    let sign = if negative { -1 } else { 1 };

    let minutes = if s.contains(':') {
        let mut parts = s.splitn(2, ':');
        let hours: i32 = parts.next().unwrap_or("0").parse()?;
        let mins: i32 = parts.next().unwrap_or("0").parse()?;
        hours * 60 + mins
    } else if s.contains('.') {
        let hours: f64 = s.parse()?;
        (hours * 60.0).round() as i32
    } else {
        let hours: i32 = s.parse()?;
        hours * 60
    };

    Ok(sign * minutes)
}

/// Format total minutes as "+H:MM" string
fn format_tz_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "+" };
    let abs = minutes.abs();
    let h = abs / 60;
    let m = abs % 60;
    if m == 0 {
        format!("{}{}", sign, h)
    } else {
        format!("{}{}:{:02}", sign, h, m)
    }
}
