use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::prayer_times::CountdownTick;
use crate::tui::theme;
use crate::utils::format::format_remaining;

pub fn render(frame: &mut Frame, area: Rect, tick: Option<&CountdownTick>, big: bool) {
    let block = Block::default()
        .title(Span::styled(" Prochaine prière ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(tick) = tick else {
        let waiting = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Horaires indisponibles", theme::dim())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(waiting, inner);
        return;
    };

    let clock_height = if big { 4 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // name
            Constraint::Length(1),            // arabic
            Constraint::Length(clock_height), // countdown
            Constraint::Length(1),            // summary
            Constraint::Length(1),            // gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let name = Paragraph::new(Line::from(vec![
        Span::raw(format!("{} ", tick.next.icon)),
        Span::styled(
            tick.next.name_local.to_uppercase(),
            theme::active().add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(name, chunks[0]);

    let arabic = Paragraph::new(Span::styled(tick.next.name_arabic, theme::gold()))
        .alignment(Alignment::Center);
    frame.render_widget(arabic, chunks[1]);

    let clock = tick.remaining.clock();
    if big {
        let big_text = BigText::builder()
            .pixel_size(PixelSize::HalfHeight)
            .style(theme::active())
            .lines(vec![clock.into()])
            .alignment(Alignment::Center)
            .build();
        frame.render_widget(big_text, chunks[2]);
    } else {
        let small = Paragraph::new(Span::styled(clock, theme::active())).alignment(Alignment::Center);
        frame.render_widget(small, chunks[2]);
    }

    let summary = Paragraph::new(Line::from(vec![
        Span::styled("dans ", theme::dim()),
        Span::styled(format_remaining(&tick.remaining), theme::gold()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(summary, chunks[3]);

    match tick.progress {
        Some(fraction) => {
            let gauge = Gauge::default()
                .gauge_style(theme::gauge())
                .ratio(fraction.clamp(0.0, 1.0))
                .label(Span::styled(
                    format!("{:.0}%", fraction * 100.0),
                    theme::bold(),
                ));
            frame.render_widget(gauge, chunks[4]);
        }
        None => {
            let na = Paragraph::new(Span::styled("—", theme::dim())).alignment(Alignment::Center);
            frame.render_widget(na, chunks[4]);
        }
    }
}
