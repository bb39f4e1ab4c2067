use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::Tab;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, tab: Tab) {
    let hints: &[(&str, &str)] = match tab {
        Tab::Prayers => &[
            ("[↑↓]", " prière  "),
            ("[n]", " notification  "),
            ("[p]", " permission  "),
        ],
        Tab::Ramadan => &[
            ("[←→↑↓]", " jour  "),
            ("[espace]", " jeûné  "),
            ("[ ]", " année  "),
        ],
        Tab::Tasbih => &[
            ("[espace]", " compter  "),
            ("[←→]", " dhikr  "),
            ("[r]", " remise à zéro  "),
        ],
    };

    let mut spans = Vec::new();
    for (key, label) in hints.iter().chain([("[Tab]", " onglet  "), ("[q]", " quitter")].iter()) {
        spans.push(Span::styled(*key, theme::gold()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
