//! Top header with target, server uptime/version, and the key legend.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
};

use crate::pane::MonitorPane;
use crate::ui::theme::HEADER_FG;
use crate::ui::util::format_uptime;

pub fn header_title(target: &str, pane: &MonitorPane) -> String {
    let mut title = format!("redwatch | {target}");
    if let Some(up) = pane.uptime_seconds {
        title.push_str(&format!(" | up {}", format_uptime(up)));
    }
    if let Some(v) = pane.server_version.as_deref() {
        title.push_str(&format!(" | v{v}"));
    }
    title.push_str("  (s: start/stop, r: refresh, c: clear, q: quit)");
    title
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, target: &str, pane: &MonitorPane) {
    f.render_widget(
        Block::default()
            .title(header_title(target, pane))
            .style(Style::default().fg(HEADER_FG))
            .borders(Borders::BOTTOM),
        area,
    );
}
