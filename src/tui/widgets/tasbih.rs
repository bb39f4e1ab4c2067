use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{Tasbih, DHIKRS};
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, tasbih: &Tasbih) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_counter(frame, columns[0], tasbih);
    render_rounds(frame, columns[1], tasbih);
}

fn render_counter(frame: &mut Frame, area: Rect, tasbih: &Tasbih) {
    let block = Block::default()
        .title(Span::styled(" Tasbih ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // selector
            Constraint::Length(1),
            Constraint::Length(3), // dhikr text
            Constraint::Length(1), // count
            Constraint::Length(1), // gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let selector: Vec<Span> = DHIKRS
        .iter()
        .enumerate()
        .flat_map(|(i, d)| {
            let style = if i == tasbih.selected() {
                theme::active().add_modifier(Modifier::UNDERLINED)
            } else {
                theme::dim()
            };
            [Span::styled(d.label, style), Span::raw("  ")]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(selector)).alignment(Alignment::Center),
        chunks[0],
    );

    let dhikr = tasbih.dhikr();
    let text = Paragraph::new(vec![
        Line::from(Span::styled(dhikr.arabic, theme::gold().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(dhikr.label, theme::bold())),
        Line::from(Span::styled(dhikr.meaning, theme::dim())),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(text, chunks[2]);

    let count = Paragraph::new(Line::from(vec![
        Span::styled(format!("{}", tasbih.count), theme::active()),
        Span::styled(format!(" / {}", dhikr.target), theme::dim()),
        Span::styled(format!("   total {}", tasbih.total), theme::dim()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(count, chunks[3]);

    let gauge = Gauge::default()
        .gauge_style(theme::gauge())
        .ratio(tasbih.ring_fraction().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, chunks[4]);
}

fn render_rounds(frame: &mut Frame, area: Rect, tasbih: &Tasbih) {
    let block = Block::default()
        .title(Span::styled(" Tours ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let items: Vec<ListItem> = if tasbih.rounds.is_empty() {
        vec![ListItem::new(Span::styled("  Aucun tour terminé", theme::dim()))]
    } else {
        tasbih
            .rounds
            .iter()
            .rev()
            .map(|r| {
                ListItem::new(Line::from(vec![
                    Span::styled("  ✓ ", theme::green()),
                    Span::styled(r.label, theme::bold()),
                    Span::styled(format!(" ×{}", r.count), theme::dim()),
                ]))
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}
