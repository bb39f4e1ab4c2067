use unicode_width::UnicodeWidthStr;

use crate::prayer_times::Remaining;

/// "Xh Ym" / "Ym" / "Zs" summary of a countdown.
pub fn format_remaining(remaining: &Remaining) -> String {
    if remaining.hours > 0 {
        format!("{}h {}m", remaining.hours, remaining.minutes)
    } else if remaining.minutes > 0 {
        format!("{}m {}s", remaining.minutes, remaining.seconds)
    } else {
        format!("{}s", remaining.seconds)
    }
}

/// Pad to a display width; emoji and Arabic labels are not one column per
/// char.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Create a simple ASCII progress bar
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let ratio = fraction.clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}
