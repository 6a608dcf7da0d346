//! Bounded scrollback for the monitor pane.

use std::collections::VecDeque;

/// Lines kept in the monitor scrollback.
pub const MAX_LINES: usize = 50;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Rendered history, oldest line first. Trimming is per line, not per block.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    lines: VecDeque<String>,
    cap: usize,
}

impl DisplayBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(cap),
            cap,
        }
    }

    // Split a block into lines and push them, dropping the oldest once full
    pub fn append(&mut self, block: &str) {
        if self.cap == 0 {
            return;
        }
        for line in block.lines() {
            push_capped(&mut self.lines, line.to_string(), self.cap);
        }
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.lines.clear();
        self.append(text);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn text(&self) -> String {
        self.lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new(MAX_LINES)
    }
}
