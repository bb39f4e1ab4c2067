use ratatui::style::{Color, Modifier, Style};

// Night sky and gold
pub const BG: Color = Color::Rgb(10, 14, 28);
pub const SURFACE: Color = Color::Rgb(18, 24, 44);
pub const BORDER: Color = Color::Rgb(44, 54, 86);
pub const TEXT: Color = Color::Rgb(232, 226, 208);
pub const TEXT_DIM: Color = Color::Rgb(120, 128, 150);
pub const GOLD: Color = Color::Rgb(201, 168, 76);
pub const GOLD_LIGHT: Color = Color::Rgb(245, 228, 170);
pub const GREEN: Color = Color::Rgb(96, 160, 110);
pub const TRACK: Color = Color::Rgb(32, 40, 66);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// The upcoming prayer.
pub fn active() -> Style {
    Style::default().fg(GOLD_LIGHT).add_modifier(Modifier::BOLD)
}

/// A prayer whose time is behind us today.
pub fn passed() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
}

pub fn gauge() -> Style {
    Style::default().fg(GOLD).bg(TRACK)
}
