use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::models::{RamadanLog, RAMADAN_DAYS};
use crate::tui::theme;

const PER_ROW: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, ramadan: &RamadanLog, cursor: u32) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Ramadan {} ", ramadan.year),
            theme::gold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length((RAMADAN_DAYS / PER_ROW * 2) as u16),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut lines = Vec::new();
    for row in 0..RAMADAN_DAYS / PER_ROW {
        let mut spans = vec![Span::raw("  ")];
        for col in 0..PER_ROW {
            let day = (row * PER_ROW + col + 1) as u32;
            let fasted = ramadan.is_fasted(day);
            let mut style = if fasted { theme::green() } else { theme::dim() };
            if day == cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            let mark = if fasted { "●" } else { "○" };
            spans.push(Span::styled(format!(" {mark}{day:>2} "), style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let count = ramadan.fasted_count();
    let summary = Line::from(vec![
        Span::styled("  Jours jeûnés : ", theme::dim()),
        Span::styled(
            format!("{count}/{RAMADAN_DAYS}"),
            theme::gold().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[2]);

    let gauge = Gauge::default()
        .gauge_style(theme::gauge())
        .percent(ramadan.progress_percent());
    frame.render_widget(gauge, chunks[3]);
}
