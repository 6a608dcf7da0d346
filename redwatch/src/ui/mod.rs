//! UI module root: markup conversion and drawing functions for the panes.

pub mod header;
pub mod markup;
pub mod monitor;
pub mod theme;
pub mod util;
