//! Inline color markup (`[green]text[white]`) to ratatui lines.
//!
//! A tag sets the foreground for everything after it until the next tag.
//! `[-]` resets to the default style. Brackets that do not name a known
//! color are kept as literal text, so `[ACTIVE]` renders as written.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::ui::theme::tag_color;

pub fn markup_line(src: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut style = Style::default();
    let mut current = String::new();
    let mut rest = src;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else { break };
        let name = &after[..close];

        let next_style = if name == "-" {
            Some(Style::default())
        } else {
            tag_color(name).map(|c| Style::default().fg(c))
        };

        match next_style {
            Some(s) => {
                current.push_str(&rest[..open]);
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style));
                }
                style = s;
                rest = &after[close + 1..];
            }
            None => {
                // literal '[' and keep scanning after it
                current.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    current.push_str(rest);
    if !current.is_empty() {
        spans.push(Span::styled(current, style));
    }
    Line::from(spans)
}

/// Style state does not carry across lines; every block line opens its own tags.
pub fn markup_lines<'a, I>(lines: I) -> Vec<Line<'static>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().map(markup_line).collect()
}

/// Text with all recognized tags removed.
pub fn strip_markup(src: &str) -> String {
    markup_line(src)
        .spans
        .iter()
        .map(|s| s.content.as_ref())
        .collect()
}
