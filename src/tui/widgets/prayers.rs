use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{PrayerState, PRAYERS, PRAYER_COUNT};
use crate::notify::{NotifPreferences, PermissionState};
use crate::prayer_times::PrayerSchedule;
use crate::tui::theme;
use crate::utils::format::pad_display;

pub struct PrayerList<'a> {
    pub schedule: Option<&'a PrayerSchedule>,
    pub states: [PrayerState; PRAYER_COUNT],
    pub preferences: &'a NotifPreferences,
    pub permission: PermissionState,
    pub show_arabic: bool,
    pub focused_idx: usize,
}

pub fn render(frame: &mut Frame, area: Rect, list: &PrayerList) {
    let block = Block::default()
        .title(Span::styled(" Prières ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut items: Vec<ListItem> = PRAYERS
        .iter()
        .zip(list.states.iter())
        .enumerate()
        .map(|(i, (def, state))| {
            let time_str = list
                .schedule
                .map(|s| s.display_time(def.key))
                .unwrap_or_else(|| "--:--".to_string());

            let style = if state.active {
                theme::active()
            } else if state.passed {
                theme::passed()
            } else {
                theme::bold()
            };

            let marker = if i == list.focused_idx { "▸ " } else { "  " };
            let bell = if !list.permission.is_granted() {
                Span::styled("  🔕", theme::dim())
            } else if list.preferences.shows_enabled(def.key) {
                Span::styled("  🔔", theme::gold())
            } else {
                Span::styled("  🔕", theme::dim())
            };

            let mut spans = vec![
                Span::styled(marker, theme::gold()),
                Span::styled(
                    pad_display(&format!("{} {}", def.icon, def.name_local), 13),
                    style,
                ),
                Span::styled(format!("{:<7}", time_str), style),
            ];
            if list.show_arabic {
                spans.push(Span::styled(pad_display(def.name_arabic, 8), theme::dim()));
            }
            spans.push(bell);
            if state.active {
                spans.push(Span::styled("  ◀", theme::active().add_modifier(Modifier::SLOW_BLINK)));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    if list.permission == PermissionState::Default {
        items.push(ListItem::new(Line::from("")));
        items.push(ListItem::new(Line::from(vec![
            Span::styled("  🔔 ", theme::gold()),
            Span::styled("[p] ", theme::gold()),
            Span::styled("activer les notifications", theme::dim()),
        ])));
    }

    frame.render_widget(List::new(items).block(block), area);
}
