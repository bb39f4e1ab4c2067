use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "alif", version, author, about = "Prayer times, countdown and adhan reminders in your terminal")]
pub struct Cli {
    /// Read today's timings from an Aladhan JSON file instead of calculating them
    #[arg(long, global = true, value_name = "FILE")]
    pub timings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save location and calculation settings
    Setup {
        /// City name shown in the header and notifications
        #[arg(long)]
        city: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Calculation method (e.g. NorthAmerica, MuslimWorldLeague, Egyptian)
        #[arg(long)]
        method: Option<String>,
        /// Hanafi or Shafi
        #[arg(long)]
        madhab: Option<String>,
        /// UTC offset, e.g. "+1", "5:30", "-4"; "local" follows the device clock
        #[arg(long, allow_hyphen_values = true)]
        tz: Option<String>,
        /// Days to shift the Hijri date for local moon sighting
        #[arg(long, allow_hyphen_values = true)]
        hijri_offset: Option<i32>,
    },
    /// Show today's prayer times, the countdown and pending notifications
    Times,
    /// Run headless: countdown in the log, notifications at prayer times
    Watch,
    /// Notification permission
    Notify {
        #[command(subcommand)]
        action: NotifyCommands,
    },
    /// Ramadan fasting tracker
    Ramadan {
        /// Year of the tracker (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        #[command(subcommand)]
        action: Option<RamadanCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommands {
    /// Allow notifications
    Grant,
    /// Block notifications
    Deny,
    /// Forget the answer; you will be asked again
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum RamadanCommands {
    /// Show the 30-day grid
    Show,
    /// Mark or unmark a day as fasted
    Toggle {
        /// Day of Ramadan (1-30)
        day: u32,
    },
}
