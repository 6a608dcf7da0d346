//! Shared UI theme constants.

use ratatui::style::Color;

pub const PANE_BORDER: Color = Color::Rgb(170, 170, 180);
pub const HEADER_FG: Color = Color::Rgb(200, 200, 210);

/// Color for an inline markup tag name, `None` when the name is not a color.
pub fn tag_color(name: &str) -> Option<Color> {
    let c = match name {
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "white" => Color::White,
        "black" => Color::Black,
        _ => return None,
    };
    Some(c)
}
