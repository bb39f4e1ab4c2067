use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, city: &str, hijri_str: &str) {
    let gregorian_str = Local::now().format("%A %d %B %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  أَلِف  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("alif", theme::gold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(format!("📍 {}", city), theme::bold()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(hijri_str, theme::gold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(gregorian_str, theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, date_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
