//! Application state and event loop

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};

use crate::services::{cycle_filter, filter_choices, InsightsAggregator, RecordStore, Snapshot, StaffDirectory};
use crate::types::{CategoryFilter, InsightsQuery, InsightsReport};

use super::theme::Theme;
use super::widgets::{
    help::HelpPopup, insights::InsightsView, services::ServicesView, staff::StaffView, tabs::Tab,
};

/// Application state
pub enum AppState {
    /// Reading the data file in the background
    Loading,
    /// Ready with loaded data
    Ready { data: Box<AppData> },
    /// Error state
    Error { message: String },
}

/// Loaded application data
pub struct AppData {
    pub snapshot: Snapshot,
    /// `all` followed by every known category
    pub choices: Vec<CategoryFilter>,
    pub report: InsightsReport,
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    reload_requested: bool,
    current_tab: Tab,
    query: InsightsQuery,
    today: NaiveDate,
    staff_scroll: usize,
    services_scroll: usize,
    show_help: bool,
    theme: Theme,
}

impl App {
    /// Create a new app in loading state
    pub fn new(today: NaiveDate, theme: Theme) -> Self {
        Self {
            state: AppState::Loading,
            should_quit: false,
            reload_requested: false,
            current_tab: Tab::default(),
            query: InsightsQuery::default(),
            today,
            staff_scroll: 0,
            services_scroll: 0,
            show_help: false,
            theme,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.prev();
            }
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reload_requested = true;
            }
            KeyCode::Char('t') => {
                self.query.timeframe = self.query.timeframe.toggle();
                self.recompute();
            }
            KeyCode::Char('c') => self.cycle_category(true),
            KeyCode::Char('C') => self.cycle_category(false),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(false),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(true),
            _ => {}
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        if let AppState::Ready { data } = &self.state {
            self.query.category = cycle_filter(&data.choices, &self.query.category, forward);
            self.recompute();
        }
    }

    fn scroll(&mut self, down: bool) {
        let AppState::Ready { data } = &self.state else {
            return;
        };
        let (scroll, len) = match self.current_tab {
            Tab::Staff => (
                &mut self.staff_scroll,
                StaffView::line_count(&StaffDirectory::partition(&data.snapshot.staff)),
            ),
            Tab::Services => (
                &mut self.services_scroll,
                ServicesView::line_count(&data.snapshot.services),
            ),
            Tab::Insights => return,
        };
        *scroll = if down {
            (*scroll + 1).min(len.saturating_sub(1))
        } else {
            scroll.saturating_sub(1)
        };
    }

    /// Install a freshly read snapshot and rebuild the report
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let choices = filter_choices(&snapshot.services);
        if !choices.contains(&self.query.category) {
            tracing::debug!(category = %self.query.category, "selected category no longer exists");
            self.query.category = CategoryFilter::All;
        }

        self.staff_scroll = 0;
        self.services_scroll = 0;
        self.state = AppState::Ready {
            data: Box::new(AppData {
                snapshot,
                choices,
                report: InsightsReport::default(),
            }),
        };
        self.recompute();
    }

    fn recompute(&mut self) {
        if let AppState::Ready { data } = &mut self.state {
            data.report = InsightsAggregator::aggregate(
                &data.snapshot.appointments,
                &data.snapshot.services,
                &self.query,
                self.today,
            );
            tracing::debug!(
                timeframe = self.query.timeframe.label(),
                category = %self.query.category,
                rows = data.report.rows.len(),
                diagnostics = ?data.report.diagnostics,
                "insights recomputed"
            );
        }
    }

    /// Take a pending reload request
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    /// Status line text: store warnings and rejected records
    fn status(&self) -> Option<String> {
        let AppState::Ready { data } = &self.state else {
            return None;
        };
        let snapshot = &data.snapshot;
        match (&snapshot.warning, snapshot.rejected) {
            (Some(warning), _) => Some(format!("{} (showing empty data)", warning)),
            (None, 0) => None,
            (None, n) => Some(format!(
                "{} record{} could not be read, see log",
                n,
                if n == 1 { "" } else { "s" }
            )),
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading => {
                let y = area.y + area.height / 2;
                Paragraph::new(Line::from(Span::styled(
                    "Loading salon data...",
                    Style::default().fg(self.theme.muted()),
                )))
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, y, area.width, 1.min(area.height)), buf);
            }
            AppState::Ready { data } => {
                let status = self.status();
                let chunks = Layout::vertical([
                    Constraint::Min(0),
                    Constraint::Length(u16::from(status.is_some())),
                ])
                .split(area);

                match self.current_tab {
                    Tab::Insights => {
                        InsightsView::new(&data.report, &self.query, self.today, self.theme)
                            .render(chunks[0], buf);
                    }
                    Tab::Staff => {
                        let directory = StaffDirectory::partition(&data.snapshot.staff);
                        StaffView::new(&directory, self.staff_scroll, self.theme)
                            .render(chunks[0], buf);
                    }
                    Tab::Services => {
                        ServicesView::new(
                            &data.snapshot.services,
                            self.services_scroll,
                            self.theme,
                        )
                        .render(chunks[0], buf);
                    }
                }

                if let Some(status) = status {
                    Paragraph::new(Line::from(Span::styled(
                        status,
                        Style::default().fg(self.theme.warning()),
                    )))
                    .alignment(Alignment::Center)
                    .render(chunks[1], buf);
                }

                // Render help popup overlay if active
                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme).render(popup_area, buf);
                }
            }
            AppState::Error { message } => {
                let y = area.y + area.height / 2;
                let text = format!("Error: {}", message);
                let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
                buf.set_string(x, y, &text, Style::default().fg(self.theme.error()));
            }
        }
    }
}

/// Run the TUI application
pub fn run(store: RecordStore) -> anyhow::Result<()> {
    // Theme detection must happen before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &store, theme);
    ratatui::restore();
    result
}

/// Read a snapshot on a background thread
fn spawn_load(store: &RecordStore) -> Receiver<Snapshot> {
    let (tx, rx) = mpsc::channel();
    let store = store.clone();
    thread::spawn(move || {
        let _ = tx.send(store.snapshot());
    });
    rx
}

fn run_app(terminal: &mut DefaultTerminal, store: &RecordStore, theme: Theme) -> anyhow::Result<()> {
    let mut app = App::new(Local::now().date_naive(), theme);
    let mut pending = Some(spawn_load(store));
    tracing::info!(path = %store.path().display(), "tui started");

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Check for data loading completion (non-blocking)
        if let Some(rx) = &pending {
            match rx.try_recv() {
                Ok(snapshot) => {
                    app.apply_snapshot(snapshot);
                    pending = None;
                }
                Err(TryRecvError::Disconnected) => {
                    app.state = AppState::Error {
                        message: "data loader stopped unexpectedly".to_string(),
                    };
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if app.take_reload_request() && pending.is_none() {
            tracing::info!("reloading data file");
            pending = Some(spawn_load(store));
        }

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
    }

    Ok(())
}
