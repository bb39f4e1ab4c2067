use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
    DefaultTerminal, Frame,
};
use rusqlite::Connection;

use crate::cli::handlers::notifier;
use crate::config::AppConfig;
use crate::controller::{Controller, ToggleOutcome};
use crate::db::repository::RamadanRepo;
use crate::events::{Event, EventHandler};
use crate::models::{PrayerKey, PrayerState, RamadanLog, Tasbih, PRAYER_COUNT, RAMADAN_DAYS};
use crate::notify::{PermissionState, ThreadTimers, TimerDriver};
use crate::prayer_times::clock::local_now;
use crate::prayer_times::{CountdownTick, ScheduleSource};
use crate::tui::theme;
use crate::tui::widgets::{header, next_prayer, prayers, ramadan, statusbar, tasbih};
use crate::utils::hijri::{to_hijri, today_hijri_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Prayers,
    Ramadan,
    Tasbih,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Prayers, Tab::Ramadan, Tab::Tasbih];

    fn index(self) -> usize {
        match self {
            Tab::Prayers => 0,
            Tab::Ramadan => 1,
            Tab::Tasbih => 2,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Tab::Prayers => " Prières ",
            Tab::Ramadan => " Ramadan ",
            Tab::Tasbih => " Tasbih ",
        }
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

pub struct App<D: TimerDriver> {
    pub tab: Tab,
    pub controller: Controller<D>,
    pub config: AppConfig,
    /// Where the permission answer is saved; `None` keeps it in memory.
    config_path: Option<PathBuf>,
    pub focus_idx: usize,
    pub show_permission_prompt: bool,
    pub should_quit: bool,

    // Refreshed on tick
    pub today: NaiveDate,
    pub hijri_str: String,
    pub tick: Option<CountdownTick>,

    pub ramadan: RamadanLog,
    pub ramadan_cursor: u32,
    pub tasbih: Tasbih,
}

impl<D: TimerDriver> App<D> {
    pub fn new(
        controller: Controller<D>,
        config: AppConfig,
        config_path: Option<PathBuf>,
        conn: &Connection,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let ramadan = RamadanRepo::load(conn, now.year())?;
        let hijri_str = today_hijri_string(config.location.hijri_offset);

        // During Ramadan the grid opens on today's day
        let ramadan_cursor = match to_hijri(now.date(), config.location.hijri_offset) {
            Ok(h) if h.is_ramadan() => (h.day as u32).clamp(1, RAMADAN_DAYS as u32),
            _ => 1,
        };
        Ok(App {
            tab: Tab::Prayers,
            controller,
            config,
            config_path,
            focus_idx: 0,
            show_permission_prompt: false,
            should_quit: false,
            today: now.date(),
            hijri_str,
            tick: None,
            ramadan,
            ramadan_cursor,
            tasbih: Tasbih::new(),
        })
    }

    /// Load timings, arm timers and start the countdown. Asks for the
    /// notification permission once if it was never answered.
    pub fn start(&mut self, now: NaiveDateTime) {
        self.controller.start(now);
        self.tick = self.controller.tick(now);
        if self.controller.permission() == PermissionState::Default {
            self.show_permission_prompt = true;
        }
    }

    pub fn on_tick(&mut self, now: NaiveDateTime) {
        self.tick = self.controller.tick(now);
        if now.date() != self.today {
            self.today = now.date();
            self.hijri_str = today_hijri_string(self.config.location.hijri_offset);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection, now: NaiveDateTime) {
        // Only handle actual key presses — ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_permission_prompt {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.answer_permission(true, now)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.answer_permission(false, now)
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                return;
            }
            KeyCode::Char('1') => {
                self.tab = Tab::Prayers;
                return;
            }
            KeyCode::Char('2') => {
                self.tab = Tab::Ramadan;
                return;
            }
            KeyCode::Char('3') => {
                self.tab = Tab::Tasbih;
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Prayers => self.handle_prayers_key(key, now),
            Tab::Ramadan => self.handle_ramadan_key(key, conn),
            Tab::Tasbih => self.handle_tasbih_key(key),
        }
    }

    fn handle_prayers_key(&mut self, key: KeyEvent, now: NaiveDateTime) {
        match key.code {
            KeyCode::Up => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.focus_idx < PRAYER_COUNT - 1 {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Char('n') | KeyCode::Enter => {
                let key = PrayerKey::ALL[self.focus_idx];
                if self.controller.toggle_notification(key, now) == ToggleOutcome::NeedsPermission {
                    self.show_permission_prompt = true;
                }
            }
            KeyCode::Char('p') => {
                self.show_permission_prompt = true;
            }
            _ => {}
        }
    }

    fn handle_ramadan_key(&mut self, key: KeyEvent, conn: &Connection) {
        let last = RAMADAN_DAYS as u32;
        match key.code {
            KeyCode::Left => self.ramadan_cursor = self.ramadan_cursor.saturating_sub(1).max(1),
            KeyCode::Right => self.ramadan_cursor = (self.ramadan_cursor + 1).min(last),
            KeyCode::Up if self.ramadan_cursor > 10 => self.ramadan_cursor -= 10,
            KeyCode::Down if self.ramadan_cursor + 10 <= last => self.ramadan_cursor += 10,
            KeyCode::Char(' ') | KeyCode::Enter => {
                match RamadanRepo::toggle_day(conn, self.ramadan.year, self.ramadan_cursor) {
                    Ok(ramadan) => self.ramadan = ramadan,
                    Err(e) => log::warn!("Could not save Ramadan day {}: {e:#}", self.ramadan_cursor),
                }
            }
            KeyCode::Char('[') => self.load_ramadan_year(conn, self.ramadan.year - 1),
            KeyCode::Char(']') => self.load_ramadan_year(conn, self.ramadan.year + 1),
            _ => {}
        }
    }

    fn handle_tasbih_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.tasbih.count() {
                    log::info!("Tasbih round completed: {}", self.tasbih.dhikr().label);
                }
            }
            KeyCode::Left => self.tasbih.select_prev(),
            KeyCode::Right => self.tasbih.select_next(),
            KeyCode::Char('r') => self.tasbih.reset(),
            _ => {}
        }
    }

    fn load_ramadan_year(&mut self, conn: &Connection, year: i32) {
        match RamadanRepo::load(conn, year) {
            Ok(ramadan) => self.ramadan = ramadan,
            Err(e) => log::warn!("Could not load Ramadan {year}: {e:#}"),
        }
    }

    fn answer_permission(&mut self, granted: bool, now: NaiveDateTime) {
        self.show_permission_prompt = false;
        let state = if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        self.controller.set_permission(state, now);
        self.config.notifications.permission = state.as_setting();
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                log::warn!("Could not save notification permission: {e:#}");
            }
        }
    }

    fn states(&self) -> [PrayerState; PRAYER_COUNT] {
        self.tick
            .as_ref()
            .map(|t| t.states)
            .unwrap_or_default()
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Length(1), // tabs
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0], self.controller.city(), &self.hijri_str);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .style(theme::dim())
            .highlight_style(theme::active().add_modifier(Modifier::UNDERLINED))
            .divider(Span::styled("│", theme::border()));
        frame.render_widget(tabs, outer_chunks[1]);

        match self.tab {
            Tab::Prayers => self.draw_prayers(frame, outer_chunks[2]),
            Tab::Ramadan => {
                ramadan::render(frame, outer_chunks[2], &self.ramadan, self.ramadan_cursor)
            }
            Tab::Tasbih => tasbih::render(frame, outer_chunks[2], &self.tasbih),
        }

        statusbar::render(frame, outer_chunks[3], self.tab);

        if self.show_permission_prompt {
            self.draw_permission_prompt(frame);
        }
    }

    fn draw_prayers(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let list = prayers::PrayerList {
            schedule: self.controller.schedule(),
            states: self.states(),
            preferences: self.controller.preferences(),
            permission: self.controller.permission(),
            show_arabic: self.config.display.show_arabic,
            focused_idx: self.focus_idx,
        };
        prayers::render(frame, columns[0], &list);
        next_prayer::render(
            frame,
            columns[1],
            self.tick.as_ref(),
            self.config.display.big_countdown,
        );
    }

    fn draw_permission_prompt(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: (area.height / 2).saturating_sub(3),
            width: area.width / 2,
            height: 6.min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Recevoir une notification à chaque prière ?",
                theme::bold(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  [y]", theme::gold()),
                Span::styled(" autoriser  ·  ", theme::dim()),
                Span::styled("[n]", theme::gold()),
                Span::styled(" refuser", theme::dim()),
            ]),
        ];

        let block = Block::default()
            .title(Span::styled(" Notifications ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }

    fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        events: &EventHandler,
        conn: &Connection,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    self.handle_key(key, conn, local_now());
                    if self.should_quit {
                        return Ok(());
                    }
                }
                Event::Tick => self.on_tick(local_now()),
                Event::NotificationDue {
                    generation,
                    notification,
                } => {
                    self.controller.on_notification_due(generation, &notification);
                }
            }
        }
    }
}

/// Run the TUI event loop.
pub fn run(
    conn: Connection,
    config: AppConfig,
    config_path: Option<PathBuf>,
    source: Box<dyn ScheduleSource>,
) -> Result<()> {
    let events = EventHandler::new();
    let timers = ThreadTimers::new(events.sender());
    let controller = Controller::new(
        source,
        notifier(&config),
        timers,
        PermissionState::from_setting(config.notifications.permission),
        config.location.city.clone(),
    );

    let now = local_now();
    let mut app = App::new(controller, config, config_path, &conn, now)?;
    app.start(now);

    let mut terminal = ratatui::init();
    events.spawn_input(250);
    let result = app.event_loop(&mut terminal, &events, &conn);
    app.controller.stop();
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::notify::timers::testing::RecordingTimers;
    use crate::notify::{LogNotifier, NotifPreferences};
    use crate::prayer_times::schedule::tests::{at, sample};
    use crate::prayer_times::PrayerSchedule;
    use crossterm::event::KeyModifiers;

    struct Fixed;

    impl ScheduleSource for Fixed {
        fn schedule_for(&self, date: NaiveDate) -> Result<PrayerSchedule> {
            let base = sample();
            Ok(PrayerKey::ALL
                .iter()
                .fold(PrayerSchedule::new(date), |s, &k| {
                    s.with(k, base.raw(k).unwrap_or_default())
                }))
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(permission: PermissionState) -> (App<RecordingTimers>, Connection) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let controller = Controller::new(
            Box::new(Fixed),
            Box::new(LogNotifier),
            RecordingTimers::default(),
            permission,
            "Paris",
        );
        let mut app = App::new(controller, AppConfig::default(), None, &conn, at(10, 0)).unwrap();
        app.start(at(10, 0));
        (app, conn)
    }

    fn prefs(app: &App<RecordingTimers>) -> &NotifPreferences {
        app.controller.preferences()
    }

    #[test]
    fn start_computes_first_tick() {
        let (app, _conn) = app(PermissionState::Granted);
        let tick = app.tick.as_ref().unwrap();
        assert_eq!(tick.next.key, PrayerKey::Dhuhr);
        assert!(!app.show_permission_prompt);
    }

    #[test]
    fn undecided_permission_prompts_at_start() {
        let (app, _conn) = app(PermissionState::Default);
        assert!(app.show_permission_prompt);
    }

    #[test]
    fn prompt_answer_is_applied_and_recorded() {
        let (mut app, conn) = app(PermissionState::Default);
        app.handle_key(press(KeyCode::Char('y')), &conn, at(10, 0));
        assert!(!app.show_permission_prompt);
        assert_eq!(app.controller.permission(), PermissionState::Granted);
        assert_eq!(app.config.notifications.permission, Some(true));
        assert!(app.controller.armed() > 0);
    }

    #[test]
    fn toggle_without_permission_reopens_prompt() {
        let (mut app, conn) = app(PermissionState::Default);
        app.handle_key(press(KeyCode::Esc), &conn, at(10, 0));
        assert_eq!(app.controller.permission(), PermissionState::Denied);
        assert!(!app.should_quit);

        app.handle_key(press(KeyCode::Char('n')), &conn, at(10, 0));
        assert!(app.show_permission_prompt);
    }

    #[test]
    fn n_toggles_focused_prayer() {
        let (mut app, conn) = app(PermissionState::Granted);
        app.handle_key(press(KeyCode::Down), &conn, at(10, 0));
        app.handle_key(press(KeyCode::Down), &conn, at(10, 0));
        assert_eq!(app.focus_idx, 2);
        app.handle_key(press(KeyCode::Char('n')), &conn, at(10, 0));
        assert_eq!(prefs(&app).get(PrayerKey::Dhuhr), Some(false));
        assert_eq!(prefs(&app).get(PrayerKey::Asr), Some(true));
    }

    #[test]
    fn focus_stays_in_range() {
        let (mut app, conn) = app(PermissionState::Granted);
        app.handle_key(press(KeyCode::Up), &conn, at(10, 0));
        assert_eq!(app.focus_idx, 0);
        for _ in 0..10 {
            app.handle_key(press(KeyCode::Down), &conn, at(10, 0));
        }
        assert_eq!(app.focus_idx, PRAYER_COUNT - 1);
    }

    #[test]
    fn tabs_cycle_and_jump() {
        let (mut app, conn) = app(PermissionState::Granted);
        app.handle_key(press(KeyCode::Tab), &conn, at(10, 0));
        assert_eq!(app.tab, Tab::Ramadan);
        app.handle_key(press(KeyCode::Tab), &conn, at(10, 0));
        assert_eq!(app.tab, Tab::Tasbih);
        app.handle_key(press(KeyCode::Tab), &conn, at(10, 0));
        assert_eq!(app.tab, Tab::Prayers);
        app.handle_key(press(KeyCode::Char('3')), &conn, at(10, 0));
        assert_eq!(app.tab, Tab::Tasbih);
    }

    #[test]
    fn ramadan_toggle_persists() {
        let (mut app, conn) = app(PermissionState::Granted);
        app.ramadan_cursor = 1;
        app.handle_key(press(KeyCode::Char('2')), &conn, at(10, 0));
        app.handle_key(press(KeyCode::Down), &conn, at(10, 0));
        app.handle_key(press(KeyCode::Right), &conn, at(10, 0));
        assert_eq!(app.ramadan_cursor, 12);
        app.handle_key(press(KeyCode::Char(' ')), &conn, at(10, 0));
        assert!(app.ramadan.is_fasted(12));

        let stored = RamadanRepo::load(&conn, app.ramadan.year).unwrap();
        assert!(stored.is_fasted(12));
    }

    #[test]
    fn ramadan_cursor_is_clamped() {
        let (mut app, conn) = app(PermissionState::Granted);
        app.ramadan_cursor = 1;
        app.handle_key(press(KeyCode::Char('2')), &conn, at(10, 0));
        app.handle_key(press(KeyCode::Left), &conn, at(10, 0));
        app.handle_key(press(KeyCode::Up), &conn, at(10, 0));
        assert_eq!(app.ramadan_cursor, 1);
        for _ in 0..5 {
            app.handle_key(press(KeyCode::Down), &conn, at(10, 0));
        }
        assert_eq!(app.ramadan_cursor, 21);
    }

    #[test]
    fn ramadan_grid_opens_on_todays_fast() {
        let (app, _conn) = app(PermissionState::Granted);
        let hijri = to_hijri(at(10, 0).date(), 0).unwrap();
        let expected = if hijri.is_ramadan() { hijri.day as u32 } else { 1 };
        assert_eq!(app.ramadan_cursor, expected);
    }

    #[test]
    fn ramadan_year_switch_loads_that_year() {
        let (mut app, conn) = app(PermissionState::Granted);
        let year = app.ramadan.year;
        app.handle_key(press(KeyCode::Char('2')), &conn, at(10, 0));
        app.handle_key(press(KeyCode::Char('[')), &conn, at(10, 0));
        assert_eq!(app.ramadan.year, year - 1);
        app.handle_key(press(KeyCode::Char(']')), &conn, at(10, 0));
        assert_eq!(app.ramadan.year, year);
    }

    #[test]
    fn tasbih_keys() {
        let (mut app, conn) = app(PermissionState::Granted);
        app.handle_key(press(KeyCode::Char('3')), &conn, at(10, 0));
        for _ in 0..5 {
            app.handle_key(press(KeyCode::Char(' ')), &conn, at(10, 0));
        }
        assert_eq!(app.tasbih.count, 5);
        app.handle_key(press(KeyCode::Right), &conn, at(10, 0));
        assert_eq!(app.tasbih.selected(), 1);
        assert_eq!(app.tasbih.count, 0);
        app.handle_key(press(KeyCode::Char('r')), &conn, at(10, 0));
        assert_eq!(app.tasbih.total, 0);
    }

    #[test]
    fn q_quits() {
        let (mut app, conn) = app(PermissionState::Granted);
        app.handle_key(press(KeyCode::Char('q')), &conn, at(10, 0));
        assert!(app.should_quit);
    }

    #[test]
    fn tick_follows_the_clock() {
        let (mut app, _conn) = app(PermissionState::Granted);
        app.on_tick(at(18, 0));
        assert_eq!(app.tick.as_ref().unwrap().next.key, PrayerKey::Maghrib);
    }
}
