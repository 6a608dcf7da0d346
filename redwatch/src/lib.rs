//! redwatch: a terminal monitor that polls a Redis server and scrolls
//! colorized metric snapshots in a single pane.
//!
//! The core is [`poller::MetricsPoller`], which talks to a
//! [`client::RedisSource`] and writes into a shared [`pane::MonitorPane`].
//! [`app::App`] owns the terminal and the event loop.

pub mod app;
pub mod client;
pub mod demo;
pub mod error;
pub mod history;
pub mod logging;
pub mod pane;
pub mod poller;
pub mod profiles;
pub mod report;
pub mod types;
pub mod ui;
