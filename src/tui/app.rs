//! Main TUI application logic.

use super::{charts, dashboard, events, market, options, portfolio, LogBuffer, Theme};
use crate::config::Config;
use crate::error::Result;
use crate::pages::{Navigator, Page, Route};
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame, Terminal,
};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};
use tracing::info;

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate and drive page actions.
    Normal,
    /// Keys edit the dashboard watchlist query.
    Search,
}

/// Main TUI application.
pub struct App {
    /// Mounted page and its timers.
    navigator: Navigator,
    /// Captured tracing output.
    logs: Arc<LogBuffer>,
    theme: Theme,
    input: InputMode,
    /// Highlighted strategy row on the dashboard.
    strategy_cursor: usize,
    should_quit: bool,
}

impl App {
    /// Create the app with the dashboard mounted.
    pub fn new(config: Config, logs: Arc<LogBuffer>) -> Self {
        Self {
            navigator: Navigator::new(config),
            logs,
            theme: Theme::default(),
            input: InputMode::Normal,
            strategy_cursor: 0,
            should_quit: false,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn input_mode(&self) -> InputMode {
        self.input
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle an event.
    pub fn handle_event(&mut self, event: events::Event) {
        match event {
            events::Event::Key(key) => self.handle_key(&key),
            events::Event::Tick | events::Event::Resize(_, _) => {
                // redrawn on every loop iteration
            }
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if events::is_interrupt(key) {
            self.should_quit = true;
            return;
        }
        if self.input == InputMode::Search {
            self.handle_search_key(key);
            return;
        }
        if events::is_quit(key) {
            self.should_quit = true;
            return;
        }

        // Route navigation
        if let KeyCode::Char(c) = key.code {
            if let Some(route) = Route::from_key(c) {
                if self.navigator.navigate(route) {
                    self.strategy_cursor = 0;
                }
                return;
            }
        }

        self.handle_page_key(key);
    }

    fn handle_search_key(&mut self, key: &KeyEvent) {
        let Page::Dashboard(feed) = self.navigator.page() else {
            self.input = InputMode::Normal;
            return;
        };

        match key.code {
            KeyCode::Esc => {
                feed.apply(|s| s.with_query(""));
                self.input = InputMode::Normal;
            }
            KeyCode::Enter => self.input = InputMode::Normal,
            KeyCode::Backspace => feed.apply(|s| {
                let mut query = s.query.clone();
                query.pop();
                s.with_query(&query)
            }),
            KeyCode::Char(c) => feed.apply(|s| s.with_query(&format!("{}{}", s.query, c))),
            _ => {}
        }
    }

    fn handle_page_key(&mut self, key: &KeyEvent) {
        let is = |c: char| events::is_key(key, KeyCode::Char(c));

        let (page, rng) = self.navigator.page_and_rng();
        match page {
            Page::Dashboard(feed) => {
                let count = feed.snapshot().strategies.len();
                if is('/') {
                    self.input = InputMode::Search;
                } else if is('e') {
                    feed.apply(|s| s.toggle_emergency_stop());
                } else if is('t') {
                    feed.apply(|s| s.next_timeframe());
                } else if key.code == KeyCode::Up {
                    self.strategy_cursor = self.strategy_cursor.saturating_sub(1);
                } else if key.code == KeyCode::Down && count > 0 {
                    self.strategy_cursor = (self.strategy_cursor + 1).min(count - 1);
                } else if key.code == KeyCode::Enter || is(' ') {
                    let cursor = self.strategy_cursor;
                    feed.apply(|s| match s.strategies.get(cursor) {
                        Some(strategy) => s.toggle_strategy(&strategy.name),
                        None => s.clone(),
                    });
                } else if key.code == KeyCode::Tab {
                    feed.apply(|s| {
                        let visible = s.filtered_watchlist();
                        let next = visible
                            .iter()
                            .position(|e| e.symbol == s.selected_symbol)
                            .map_or(0, |i| (i + 1) % visible.len().max(1));
                        match visible.get(next) {
                            Some(entry) => s.select(&entry.symbol),
                            None => s.clone(),
                        }
                    });
                }
            }
            Page::MarketOverview(feed) => {
                if is('s') {
                    feed.apply(|s| s.next_sector());
                }
            }
            Page::Charts(feed) => {
                if is('p') {
                    feed.toggle_live();
                } else if is('t') {
                    feed.apply(|s| s.next_timeframe());
                } else if is('n') {
                    feed.apply(|s| s.next_symbol());
                }
            }
            Page::Portfolio(state) => {
                if is('p') {
                    state.next_period();
                }
            }
            Page::Options(feed) => {
                if is('v') {
                    feed.apply(|s| s.next_view());
                } else if is('x') {
                    feed.apply(|s| s.next_expiry(rng));
                } else if is('n') {
                    feed.apply(|s| s.next_symbol());
                }
            }
        }
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.size();

        // Create main layout: tabs at top, content below, status bar at bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);

        let config = self.navigator.config();
        match self.navigator.page() {
            Page::Dashboard(feed) => dashboard::render(
                frame,
                chunks[1],
                &feed.snapshot(),
                self.input == InputMode::Search,
                self.strategy_cursor,
                &self.theme,
            ),
            Page::MarketOverview(feed) => market::render(frame, chunks[1], &feed.snapshot(), &self.theme),
            Page::Charts(feed) => charts::render(
                frame,
                chunks[1],
                &feed.snapshot(),
                config.chart_window,
                config.market.initial_capital,
                &self.theme,
            ),
            Page::Portfolio(state) => portfolio::render(frame, chunks[1], state, &self.theme),
            Page::Options(feed) => options::render(frame, chunks[1], &feed.snapshot(), &self.theme),
        }

        self.render_status_bar(frame, chunks[2]);
    }

    /// Render the tabs.
    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let routes = Route::all();
        let titles: Vec<Line> = routes
            .iter()
            .map(|r| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", r.key()), self.theme.muted()),
                    Span::raw(r.name()),
                ])
            })
            .collect();

        let selected = routes
            .iter()
            .position(|r| *r == self.navigator.route())
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Tickboard"))
            .select(selected)
            .style(self.theme.tab_inactive())
            .highlight_style(self.theme.tab_active());

        frame.render_widget(tabs, area);
    }

    /// Render status bar.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let page = self.navigator.page();
        let mut spans = vec![
            Span::styled("q", self.theme.muted()),
            Span::raw(" quit | "),
            Span::styled("1-5", self.theme.muted()),
            Span::raw(" views | "),
            Span::styled(
                format!("timers {} ticks {}", self.navigator.active_timers(), page.ticks()),
                self.theme.muted(),
            ),
        ];
        if let Some(line) = self.logs.latest() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(line));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        frame.render_widget(block, area);

        let inner = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: 1,
        };

        frame.render_widget(Line::from(spans), inner);
    }
}

/// Run the TUI application until the user quits.
pub async fn run_tui(config: Config, logs: Arc<LogBuffer>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, logs);
    let result = event_loop(&mut terminal, &mut app).await;
    app.navigator.shutdown();
    info!("Shutting down, {} timers left", app.navigator.active_timers());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut event_handler = events::EventHandler::new(Duration::from_millis(250));

    loop {
        terminal.draw(|f| app.render(f))?;

        match event_handler.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
