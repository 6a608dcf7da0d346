//! The scrolling monitor pane: bordered, word-wrapped, follows the tail unless scrolled.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::pane::MonitorPane;
use crate::ui::markup::markup_lines;
use crate::ui::theme::PANE_BORDER;

pub fn draw_monitor(f: &mut ratatui::Frame<'_>, area: Rect, pane: &mut MonitorPane) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PANE_BORDER))
        .padding(Padding::horizontal(1))
        .title(pane.title().to_string());
    let inner = block.inner(area);

    let lines = markup_lines(pane.buffer().lines());
    let total = wrapped_rows(&lines, inner.width as usize);
    let height = inner.height as usize;
    let max_back = total.saturating_sub(height);
    pane.clamp_scroll(max_back);

    let top = top_row(total, height, pane.is_following(), pane.scroll_back());
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((top.min(u16::MAX as usize) as u16, 0));
    f.render_widget(para, area);
}

// Rows the lines take once wrapped at `width` (character wrap; word wrap may need a few more)
pub fn wrapped_rows(lines: &[Line<'_>], width: usize) -> usize {
    if width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|l| l.width().div_ceil(width).max(1))
        .sum()
}

/// First visible row given the content height and how far the user scrolled back.
pub fn top_row(total: usize, height: usize, follow: bool, scroll_back: usize) -> usize {
    let max_top = total.saturating_sub(height);
    if follow {
        max_top
    } else {
        max_top.saturating_sub(scroll_back)
    }
}
