//! The monitor pane's state: scrollback text, border title, and scroll position.
//!
//! The poller writes into it, the draw code reads it. It is shared as
//! [`SharedPane`] because the poll loop runs on its own task.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::history::DisplayBuffer;

pub const BASE_TITLE: &str = "Real-time Monitoring";

pub type SharedPane = Arc<Mutex<MonitorPane>>;

#[derive(Debug, Clone)]
pub struct MonitorPane {
    buffer: DisplayBuffer,
    title: String,
    // rows scrolled up from the bottom; only used when not following
    scroll_back: usize,
    follow: bool,
    pub uptime_seconds: Option<u64>,
    pub server_version: Option<String>,
}

impl MonitorPane {
    pub fn new() -> Self {
        Self {
            buffer: DisplayBuffer::default(),
            title: BASE_TITLE.into(),
            scroll_back: 0,
            follow: true,
            uptime_seconds: None,
            server_version: None,
        }
    }

    pub fn shared() -> SharedPane {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    pub fn append(&mut self, block: &str) {
        self.buffer.append(block);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.scroll_back = 0;
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn scroll_to_end(&mut self) {
        self.follow = true;
        self.scroll_back = 0;
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.follow = false;
        self.scroll_back = self.scroll_back.saturating_add(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(rows);
        if self.scroll_back == 0 {
            self.follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.follow = false;
        self.scroll_back = usize::MAX;
    }

    // Keep manual scroll inside the content once the real row count is known
    pub fn clamp_scroll(&mut self, max_back: usize) {
        self.scroll_back = self.scroll_back.min(max_back);
    }
}

impl Default for MonitorPane {
    fn default() -> Self {
        Self::new()
    }
}
