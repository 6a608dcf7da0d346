//! App shell and main loop: terminal setup, key dispatch, and drawing the monitor pane.

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::time::sleep;
use tracing::info;

use crate::client::RedisSource;
use crate::pane::{MonitorPane, SharedPane};
use crate::poller::MetricsPoller;
use crate::ui::{header::draw_header, monitor::draw_monitor};

const PAGE_ROWS: usize = 10;

pub struct App<S: RedisSource + 'static> {
    poller: MetricsPoller<S>,
    pane: SharedPane,
    target: String,
    autostart: bool,
    should_quit: bool,
}

impl<S: RedisSource + 'static> App<S> {
    /// `target` is the label shown in the header (address or "demo").
    pub fn new(poller: MetricsPoller<S>, target: impl Into<String>) -> Self {
        let pane = poller.pane().clone();
        Self {
            poller,
            pane,
            target: target.into(),
            autostart: true,
            should_quit: false,
        }
    }

    /// Start monitoring as soon as the UI is up (default). Off for `--paused`.
    pub fn autostart(mut self, on: bool) -> Self {
        self.autostart = on;
        self
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        info!(target = %self.target, "monitor view ready");
        // first snapshot right away, like opening the view
        self.poller.refresh().await;
        if self.autostart {
            self.poller.start().await;
        }

        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if k.kind == KeyEventKind::Release {
                        continue;
                    }
                    // the pane claims its own keys first; the rest is ours
                    if let Some(k) = self.poller.handle_key(k).await {
                        let mut pane = self.pane.lock().await;
                        if handle_app_key(&mut pane, k) {
                            self.should_quit = true;
                        }
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // Draw
            {
                let mut pane = self.pane.lock().await;
                let target = self.target.as_str();
                terminal.draw(|f| draw(f, target, &mut pane))?;
            }

            sleep(Duration::from_millis(100)).await;
        }

        self.poller.stop().await;
        info!("exiting");
        Ok(())
    }
}

/// Keys the pane passed through: quit and scrolling. Returns true to quit.
pub fn handle_app_key(pane: &mut MonitorPane, k: KeyEvent) -> bool {
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Up | KeyCode::Char('k') => pane.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => pane.scroll_down(1),
        KeyCode::PageUp => pane.scroll_up(PAGE_ROWS),
        KeyCode::PageDown => pane.scroll_down(PAGE_ROWS),
        KeyCode::Home => pane.scroll_to_top(),
        KeyCode::End => pane.scroll_to_end(),
        _ => {}
    }
    false
}

pub fn draw(f: &mut ratatui::Frame<'_>, target: &str, pane: &mut MonitorPane) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // monitor pane
        ])
        .split(f.area());

    draw_header(f, rows[0], target, pane);
    draw_monitor(f, rows[1], pane);
}
