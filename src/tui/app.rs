use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Datelike, Days, Local, NaiveDate, Timelike};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use rusqlite::Connection;

use crate::bridge::{CityHit, Companion, HttpBridge};
use crate::config::AppConfig;
use crate::db::store;
use crate::models::{Location, MonthlyCache};
use crate::qibla::{CompassState, DisplayMetrics, QiblaEngine, QiblaSession};
use crate::schedule::{
    GridView, ScheduleView, build_grid_view, build_schedule_view, day_for_date, is_cache_valid,
};
use crate::sensors::{SimulatedCompass, TerminalBell};
use crate::tui::events::{BridgeReply, Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::statusbar::StatusKind;
use crate::tui::widgets::{cities, header, next_prayer, prayer_grid, qibla, schedule, statusbar};

/// Geometry the compass engine positions its dot on; the qibla widget
/// scales it to cells.
const ENGINE_METRICS: DisplayMetrics = DisplayMetrics::new(480.0, 480.0, 20.0, 180.0);

const STATUS_TTL: Duration = Duration::from_secs(4);

/// Guidance shown on the help overlay above the keybindings. IP
/// geolocation is only as good as the route the request takes.
const HELP_GUIDANCE: [&str; 7] = [
    "This app detects your location and fetches",
    "accurate local prayer times.",
    "",
    "For the best results:",
    "• Check your network connection",
    "• Disconnect from VPN",
    "• Turn off iCloud Private Relay",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Schedule,
    Qibla,
    Cities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    CitySearch,
}

/// Which bridge request the app is waiting on. Only the newest request
/// counts; replies for anything else are dropped by sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Locate,
    Month,
    Search,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    bridge: HttpBridge,

    // Mirrors of the persisted state
    location: Option<Location>,
    cache: Option<MonthlyCache>,
    cities_list: Vec<Location>,
    active_city: Option<String>,

    // Render-ready projections, rebuilt on tick
    schedule_view: Option<ScheduleView>,
    grid_view: Option<GridView>,

    // Compass; the session exists only once a location is known and is
    // started/stopped as the qibla view comes and goes
    sim: SimulatedCompass,
    session: Option<QiblaSession>,
    compass_state: CompassState,

    // City search popup
    input_mode: InputMode,
    input_buffer: String,
    input_error: Option<String>,
    search_results: Vec<CityHit>,
    search_focus: usize,
    searching: bool,

    cities_focus: usize,
    show_help: bool,

    // Bridge liveness: the sequence number of the one in-flight request
    next_seq: u64,
    pending: Option<(u64, Pending)>,
    // Day of the last failed month fetch; parks automatic refetching
    fetch_failed_on: Option<NaiveDate>,

    status: Option<(String, StatusKind, Instant)>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let bridge = HttpBridge::new(&config.bridge)?;
        let sim = SimulatedCompass::new(config.compass.initial_heading);

        Ok(App {
            view: View::Schedule,
            config,
            should_quit: false,
            bridge,
            location: None,
            cache: None,
            cities_list: Vec::new(),
            active_city: None,
            schedule_view: None,
            grid_view: None,
            sim,
            session: None,
            compass_state: CompassState::Calibrating,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            search_results: Vec::new(),
            search_focus: 0,
            searching: false,
            cities_focus: 0,
            show_help: false,
            next_seq: 0,
            pending: None,
            fetch_failed_on: None,
            status: None,
        })
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        self.location = store::load_location(conn)?;
        self.cache = store::load_cache(conn)?;
        self.cities_list = store::load_cities(conn)?;
        self.active_city = store::load_active_city(conn)?.map(|l| l.city);
        self.session = None;
        self.rebuild_views();
        Ok(())
    }

    /// First network kicks after load: detect a location if none is
    /// saved. A stale cache is picked up by the tick loop.
    pub fn bootstrap(&mut self, tx: &Sender<Event>) {
        if self.location.is_none() {
            self.spawn_locate(tx);
        }
    }

    fn rebuild_views(&mut self) {
        self.schedule_view = None;
        self.grid_view = None;

        let Some(location) = &self.location else { return };
        let Some(cache) = &self.cache else { return };
        let today = Local::now().date_naive();
        if !is_cache_valid(Some(cache), today) {
            return;
        }
        let Some(entry) = day_for_date(cache, today) else { return };
        let tomorrow = today
            .checked_add_days(Days::new(1))
            .and_then(|d| day_for_date(cache, d));

        let now = Local::now().time();
        let now_minutes = (now.hour() * 60 + now.minute()) as i32;
        self.schedule_view = Some(build_schedule_view(&location.city, entry, tomorrow, now_minutes));
        self.grid_view = Some(build_grid_view(
            entry,
            tomorrow,
            now_minutes,
            self.config.current_prayer_policy(),
        ));
    }

    pub fn tick(&mut self, tx: &Sender<Event>) {
        let expired = match &self.status {
            Some((_, kind, at)) => *kind != StatusKind::Error && at.elapsed() > STATUS_TTL,
            None => false,
        };
        if expired {
            self.status = None;
        }

        self.rebuild_views();

        // Month rollover (or a cleared cache) while the app is open.
        // Never a retry loop: one failure parks this for the day.
        let today = Local::now().date_naive();
        let cache_ok = is_cache_valid(self.cache.as_ref(), today);
        if self.location.is_some()
            && !cache_ok
            && !self.month_fetch_parked(today)
            && self.pending.is_none()
        {
            self.spawn_fetch_month(tx);
        }

        if self.view == View::Qibla {
            if let Some(session) = self.session.as_mut() {
                self.compass_state = session.tick(Instant::now());
            }
        }
    }

    // ─── Bridge requests ─────────────────────────────────────────────────────

    fn begin(&mut self, kind: Pending) -> u64 {
        self.next_seq += 1;
        self.pending = Some((self.next_seq, kind));
        self.next_seq
    }

    /// Claims a reply. A reply that does not carry the in-flight
    /// sequence number belongs to an abandoned request and is dropped.
    fn take_pending(&mut self, seq: u64) -> bool {
        match self.pending {
            Some((current, _)) if current == seq => {
                self.pending = None;
                true
            }
            _ => {
                log::debug!("dropping stale bridge reply (seq {})", seq);
                false
            }
        }
    }

    fn spawn_locate(&mut self, tx: &Sender<Event>) {
        let seq = self.begin(Pending::Locate);
        self.set_status("Detecting location...", StatusKind::Info);
        let bridge = self.bridge.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            let result = bridge.locate().map_err(|e| e.to_string());
            let _ = tx.send(Event::Bridge(BridgeReply::Located { seq, result }));
        });
    }

    /// After a failed fetch, the tick loop leaves the feed alone for
    /// the rest of the day; the error stays on the status line and a
    /// manual refresh or a city switch lifts the hold early.
    fn month_fetch_parked(&self, today: NaiveDate) -> bool {
        self.fetch_failed_on == Some(today)
    }

    fn spawn_fetch_month(&mut self, tx: &Sender<Event>) {
        let Some(location) = self.location.clone() else {
            return;
        };
        self.fetch_failed_on = None;
        let seq = self.begin(Pending::Month);
        self.set_status("Loading prayer times...", StatusKind::Info);
        let bridge = self.bridge.clone();
        let tx = tx.clone();
        let today = Local::now().date_naive();
        thread::spawn(move || {
            let result = bridge
                .fetch_month(&location, today.year(), today.month())
                .map_err(|e| e.to_string());
            let _ = tx.send(Event::Bridge(BridgeReply::MonthLoaded { seq, result }));
        });
    }

    fn spawn_search(&mut self, tx: &Sender<Event>) {
        let query = self.input_buffer.trim().to_string();
        if query.chars().count() < 2 {
            self.input_error = Some("Enter at least 2 letters".to_string());
            return;
        }
        let seq = self.begin(Pending::Search);
        self.searching = true;
        self.input_error = None;
        self.search_results.clear();
        let bridge = self.bridge.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            let result = bridge.search_city(&query).map_err(|e| e.to_string());
            let _ = tx.send(Event::Bridge(BridgeReply::CitiesFound { seq, result }));
        });
    }

    pub fn handle_reply(&mut self, reply: BridgeReply, conn: &Connection, tx: &Sender<Event>) {
        match reply {
            BridgeReply::Located { seq, result } => {
                if !self.take_pending(seq) {
                    return;
                }
                match result {
                    Ok(fix) => {
                        let mut detected =
                            Location::new(&fix.city, &fix.country, fix.latitude, fix.longitude);
                        detected.method = self.config.prayer.method;
                        self.adopt_location(detected, conn, tx, "Location set to");
                    }
                    Err(e) => {
                        log::error!("geolocation failed: {}", e);
                        self.set_status("Location detection failed", StatusKind::Error);
                    }
                }
            }

            BridgeReply::MonthLoaded { seq, result } => {
                if !self.take_pending(seq) {
                    return;
                }
                match result {
                    Ok(cache) => {
                        if let Err(e) = store::save_cache(conn, &cache) {
                            log::error!("saving prayer cache: {}", e);
                        }
                        self.cache = Some(cache);
                        self.rebuild_views();
                        self.set_status("✓ Prayer times updated", StatusKind::Success);
                    }
                    Err(e) => {
                        log::error!("prayer times fetch failed: {}", e);
                        self.fetch_failed_on = Some(Local::now().date_naive());
                        self.set_status("Failed to load data", StatusKind::Error);
                    }
                }
            }

            BridgeReply::CitiesFound { seq, result } => {
                if !self.take_pending(seq) {
                    return;
                }
                self.searching = false;
                // The popup may have been closed while the search ran.
                if self.input_mode != InputMode::CitySearch {
                    return;
                }
                match result {
                    Ok(hits) if hits.is_empty() => {
                        self.input_error = Some("City not found. Try again.".to_string());
                    }
                    Ok(hits) => {
                        self.search_results = hits;
                        self.search_focus = 0;
                    }
                    Err(e) => {
                        log::error!("city search failed: {}", e);
                        self.input_error =
                            Some("Search failed. Check phone connection.".to_string());
                    }
                }
            }
        }
    }

    /// Install a new active location: persist it, drop the stale month
    /// of timings, rebuild the compass around the new bearing, refetch.
    /// A detection that lands in the already active city changes
    /// nothing.
    fn adopt_location(
        &mut self,
        location: Location,
        conn: &Connection,
        tx: &Sender<Event>,
        verb: &str,
    ) {
        if let Some(existing) = &self.location {
            if existing.same_city(&location) {
                self.set_status(&format!("✓ Still in {}", existing.city), StatusKind::Success);
                return;
            }
        }

        if let Err(e) = store::activate_city(conn, &location) {
            log::error!("saving location: {}", e);
        }
        self.active_city = Some(location.city.clone());
        let message = format!("✓ {} {}", verb, location.city);
        self.location = Some(location);
        self.cache = None;
        self.session = None;
        self.compass_state = CompassState::Calibrating;
        self.rebuild_views();
        self.spawn_fetch_month(tx);
        self.set_status(&message, StatusKind::Success);
    }

    // ─── Compass lifecycle ───────────────────────────────────────────────────

    fn ensure_session(&mut self) {
        if self.session.is_some() {
            return;
        }
        let Some(location) = &self.location else { return };
        let engine = QiblaEngine::new(location.latitude, location.longitude, ENGINE_METRICS);
        self.session = Some(QiblaSession::new(
            engine,
            Box::new(self.sim.clone()),
            Box::new(TerminalBell),
        ));
    }

    fn switch_view(&mut self, next: View) {
        if self.view == View::Qibla && next != View::Qibla {
            if let Some(session) = self.session.as_mut() {
                session.stop();
            }
            self.compass_state = CompassState::Calibrating;
        }
        if next == View::Qibla && self.view != View::Qibla {
            self.ensure_session();
            if let Some(session) = self.session.as_mut() {
                session.start();
            }
        }
        self.view = next;
    }

    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
    }

    // ─── Keys ────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection, tx: &Sender<Event>) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.input_mode {
            InputMode::CitySearch => self.handle_search_key(key, conn, tx),
            InputMode::Normal => self.handle_normal_key(key, conn, tx),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent, conn: &Connection, tx: &Sender<Event>) {
        match key.code {
            KeyCode::Esc => match self.view {
                View::Schedule => self.should_quit = true,
                _ => self.switch_view(View::Schedule),
            },
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => {
                let next = match self.view {
                    View::Schedule => View::Qibla,
                    View::Qibla => View::Cities,
                    View::Cities => View::Schedule,
                };
                self.switch_view(next);
            }
            KeyCode::Char('1') => self.switch_view(View::Schedule),
            KeyCode::Char('2') => self.switch_view(View::Qibla),
            KeyCode::Char('3') => self.switch_view(View::Cities),
            KeyCode::Char('l') => self.spawn_locate(tx),
            KeyCode::Char('r') => {
                if self.location.is_some() {
                    self.spawn_fetch_month(tx);
                } else {
                    self.spawn_locate(tx);
                }
            }
            KeyCode::Char('a') => {
                self.input_mode = InputMode::CitySearch;
                self.input_buffer.clear();
                self.input_error = None;
                self.search_results.clear();
                self.search_focus = 0;
            }
            _ => match self.view {
                View::Qibla => self.handle_qibla_key(key),
                View::Cities => self.handle_cities_key(key, conn, tx),
                View::Schedule => {}
            },
        }
    }

    fn handle_qibla_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.sim.rotate(-5.0),
            KeyCode::Right => self.sim.rotate(5.0),
            KeyCode::Char('c') => self.sim.toggle_calibration(),
            _ => {}
        }
    }

    fn handle_cities_key(&mut self, key: KeyEvent, conn: &Connection, tx: &Sender<Event>) {
        match key.code {
            KeyCode::Up => {
                self.cities_focus = self.cities_focus.saturating_sub(1);
            }
            KeyCode::Down => {
                let max = self.cities_list.len().saturating_sub(1);
                if self.cities_focus < max {
                    self.cities_focus += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(city) = self.cities_list.get(self.cities_focus).cloned() {
                    self.adopt_location(city, conn, tx, "Switched to");
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, conn: &Connection, tx: &Sender<Event>) {
        match key.code {
            KeyCode::Esc => self.close_search(),
            KeyCode::Enter => {
                if self.search_results.is_empty() {
                    self.spawn_search(tx);
                } else {
                    self.add_focused_hit(conn, tx);
                }
            }
            KeyCode::Up => {
                self.search_focus = self.search_focus.saturating_sub(1);
            }
            KeyCode::Down => {
                let max = self.search_results.len().saturating_sub(1);
                if self.search_focus < max {
                    self.search_focus += 1;
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
                self.search_results.clear();
                self.search_focus = 0;
            }
            KeyCode::Char(c) if c.is_alphanumeric() || " -'".contains(c) => {
                self.input_buffer.push(c);
                self.input_error = None;
                self.search_results.clear();
                self.search_focus = 0;
            }
            _ => {}
        }
    }

    fn close_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.input_error = None;
        self.search_results.clear();
        self.search_focus = 0;
        self.searching = false;
        // A reply for a closed popup must not reopen it.
        if matches!(self.pending, Some((_, Pending::Search))) {
            self.pending = None;
        }
    }

    fn add_focused_hit(&mut self, conn: &Connection, tx: &Sender<Event>) {
        let Some(hit) = self.search_results.get(self.search_focus).cloned() else {
            return;
        };
        let mut chosen = hit.into_location();
        chosen.method = self.config.prayer.method;

        let already_saved = self.cities_list.iter().any(|c| c.same_city(&chosen));
        if !already_saved {
            self.cities_list.push(chosen.clone());
            if let Err(e) = store::save_cities(conn, &self.cities_list) {
                log::error!("saving cities: {}", e);
            }
        }

        self.close_search();
        self.adopt_location(chosen.clone(), conn, tx, "Switched to");
        if already_saved {
            self.set_status(&format!("{} is already saved", chosen.city), StatusKind::Info);
        } else {
            self.set_status(&format!("✓ {} added!", chosen.city), StatusKind::Success);
        }
    }

    fn set_status(&mut self, text: &str, kind: StatusKind) {
        self.status = Some((text.to_string(), kind, Instant::now()));
    }

    // ─── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let (city, hijri, gregorian) = match &self.schedule_view {
            Some(v) => (
                Some(v.city.as_str()),
                Some(v.hijri.as_str()),
                Some(v.gregorian.as_str()),
            ),
            None => (self.location.as_ref().map(|l| l.city.as_str()), None, None),
        };
        header::render(frame, outer[0], city, hijri, gregorian);

        let status = self
            .status
            .as_ref()
            .map(|(text, kind, _)| (text.as_str(), *kind));
        statusbar::render(frame, outer[2], status);

        match self.view {
            View::Schedule => self.draw_schedule(frame, outer[1]),
            View::Qibla => self.draw_qibla(frame, outer[1]),
            View::Cities => cities::render(
                frame,
                outer[1],
                &self.cities_list,
                self.active_city.as_deref(),
                self.cities_focus,
                true,
            ),
        }

        if self.input_mode == InputMode::CitySearch {
            self.draw_search_popup(frame);
        }
        if self.show_help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_schedule(&self, frame: &mut Frame, body: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(11), Constraint::Min(0)])
            .split(columns[0]);

        next_prayer::render(frame, left[0], self.schedule_view.as_ref());
        let cells = self
            .schedule_view
            .as_ref()
            .map(|v| v.cells.as_slice())
            .unwrap_or(&[]);
        schedule::render(frame, left[1], cells);

        prayer_grid::render(frame, columns[1], self.grid_view.as_ref());
    }

    fn draw_qibla(&self, frame: &mut Frame, body: Rect) {
        let (bearing, direction) = match self.session.as_ref() {
            Some(session) => (session.bearing(), session.direction()),
            None => (0.0, "N"),
        };
        qibla::render(
            frame,
            body,
            self.location.as_ref(),
            bearing,
            direction,
            &self.compass_state,
        );
    }

    fn draw_search_popup(&self, frame: &mut Frame) {
        let area = frame.area();
        let results_rows = self.search_results.len().min(6) as u16;
        let error_rows = if self.input_error.is_some() { 2 } else { 0 };
        let searching_rows = if self.searching { 2 } else { 0 };
        let height = 6 + results_rows + error_rows + searching_rows;

        let popup_area = Rect {
            x: area.width / 4,
            y: (area.height / 4).min(area.height.saturating_sub(height)),
            width: area.width / 2,
            height: height.min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  City name: ", theme::dim()),
                Span::styled(
                    self.input_buffer.as_str(),
                    theme::gold().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", theme::amber()), // block cursor
            ]),
            Line::from(""),
        ];

        if self.searching {
            text.push(Line::from(Span::styled("  Searching...", theme::amber())));
            text.push(Line::from(""));
        }

        for (i, hit) in self.search_results.iter().take(6).enumerate() {
            let pointer = if i == self.search_focus { "▸" } else { " " };
            let style = if i == self.search_focus {
                theme::gold().add_modifier(Modifier::BOLD)
            } else {
                theme::dim()
            };
            text.push(Line::from(Span::styled(
                format!("  {} {}, {}", pointer, hit.name, hit.country),
                style,
            )));
        }

        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        text.push(Line::from(""));
        let hint = if self.search_results.is_empty() {
            "  Type a city, then [Enter]  ·  [Esc] close"
        } else {
            "  [↑↓] pick  ·  [Enter] add  ·  [Esc] close"
        };
        text.push(Line::from(Span::styled(hint, theme::dim())));

        let border_style = if self.input_error.is_some() {
            theme::red()
        } else {
            theme::amber()
        };
        let block = Block::default()
            .title(Span::styled(" Add City ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 6,
            width: area.width / 2,
            height: (area.height * 2 / 3).min(21),
        };

        frame.render_widget(Clear, popup_area);

        let rows = [
            ("[Tab] / [1][2][3]", "Switch view"),
            ("[l]", "Detect location"),
            ("[r]", "Refresh prayer times"),
            ("[a]", "Search and add a city"),
            ("[Enter]", "Cities: make selection active"),
            ("[← →]", "Qibla: turn the simulated wrist"),
            ("[c]", "Qibla: toggle calibration"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Back / quit"),
        ];

        let mut help_text = Vec::new();
        for line in &HELP_GUIDANCE {
            help_text.push(Line::from(Span::styled(format!("  {}", line), theme::dim())));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "  Keybindings",
            theme::gold().add_modifier(Modifier::BOLD),
        )));
        help_text.push(Line::from(""));
        for (key, label) in &rows {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<18}", key), theme::gold()),
                Span::styled(*label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let mut app = App::new(config)?;
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(500);
    let tx = events.sender();
    app.bootstrap(&tx);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, &conn, &tx);
                if app.should_quit {
                    break;
                }
            }
            Event::Tick => {
                app.tick(&tx);
            }
            Event::Bridge(reply) => {
                app.handle_reply(reply, &conn, &tx);
            }
        }
    }

    app.shutdown();
    ratatui::restore();
    Ok(())
}
