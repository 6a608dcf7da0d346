//! Periodic metrics polling for the monitor pane.
//!
//! `start` spawns one background task that runs a fetch-and-render cycle per
//! tick until `stop` (or drop) fires its oneshot. `refresh`, `clear` and key
//! handling run on the caller's task.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::RedisSource;
use crate::error::FetchError;
use crate::pane::{SharedPane, BASE_TITLE};
use crate::report::{cluster_error_table, cluster_node_table, format_report, standalone_node_table};
use crate::types::ServerInfo;

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

struct Session {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

pub struct MetricsPoller<S: RedisSource + 'static> {
    source: Arc<S>,
    pane: SharedPane,
    local_addr: Arc<str>,
    interval: Duration,
    session: Option<Session>,
}

impl<S: RedisSource + 'static> MetricsPoller<S> {
    /// `local_addr` is shown as the node address when the server is not clustered.
    pub fn new(source: Arc<S>, pane: SharedPane, local_addr: &str) -> Self {
        Self {
            source,
            pane,
            local_addr: Arc::from(local_addr),
            interval: POLL_INTERVAL,
            session: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn pane(&self) -> &SharedPane {
        &self.pane
    }

    pub fn is_monitoring(&self) -> bool {
        self.session.is_some()
    }

    /// Begin ticking. Returns `false` if a loop is already running.
    pub async fn start(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let source = Arc::clone(&self.source);
        let pane = Arc::clone(&self.pane);
        let addr = Arc::clone(&self.local_addr);
        let period = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    // also fires if the sender is dropped with the poller
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => fetch_and_render(source.as_ref(), &pane, &addr).await,
                }
            }
            debug!("monitor loop exited");
        });

        self.session = Some(Session {
            stop: stop_tx,
            task,
        });
        info!(interval_ms = period.as_millis() as u64, "monitoring started");
        self.update_title().await;
        true
    }

    /// Stop ticking. Returns `false` if nothing was running.
    pub async fn stop(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        // the loop may already be gone; nothing to do then
        let _ = session.stop.send(());
        // a cycle still in flight must not render after we report STOPPED
        session.task.abort();
        let _ = session.task.await;
        info!("monitoring stopped");
        self.update_title().await;
        true
    }

    pub async fn toggle_monitoring(&mut self) {
        if self.is_monitoring() {
            self.stop().await;
        } else {
            self.start().await;
        }
    }

    /// One cycle right now, independent of the timer.
    pub async fn refresh(&self) {
        fetch_and_render(self.source.as_ref(), &self.pane, &self.local_addr).await;
    }

    pub async fn clear(&self) {
        self.pane.lock().await.clear();
    }

    /// Claims `s` (start/stop), `c` (clear) and `r` (refresh); returns any
    /// other key for the caller to dispatch.
    pub async fn handle_key(&mut self, key: KeyEvent) -> Option<KeyEvent> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Some(key);
        }
        match key.code {
            KeyCode::Char('s' | 'S') => self.toggle_monitoring().await,
            KeyCode::Char('c' | 'C') => self.clear().await,
            KeyCode::Char('r' | 'R') => self.refresh().await,
            _ => return Some(key),
        }
        None
    }

    async fn update_title(&self) {
        let state = if self.is_monitoring() { "ACTIVE" } else { "STOPPED" };
        self.pane
            .lock()
            .await
            .set_title(format!("{BASE_TITLE} [{state}]"));
    }
}

impl<S: RedisSource + 'static> Drop for MetricsPoller<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            let _ = session.stop.send(());
            session.task.abort();
        }
    }
}

/// Fetch everything for one cycle and format the block, without touching the pane.
///
/// A metrics failure skips the info and cluster calls; an info failure skips
/// the cluster call. A cluster failure only degrades the node section.
pub async fn build_report<S: RedisSource + ?Sized>(
    source: &S,
    local_addr: &str,
    timestamp: &str,
) -> Result<(String, ServerInfo), FetchError> {
    let metrics = source.metrics().await.map_err(FetchError::Metrics)?;
    let info = source.info().await.map_err(FetchError::Info)?;

    let node_table = if info.cluster_enabled {
        match source.cluster_nodes().await {
            Ok(raw) => cluster_node_table(&raw),
            Err(e) => {
                warn!("CLUSTER NODES failed: {e}");
                cluster_error_table()
            }
        }
    } else {
        standalone_node_table(&info.role, local_addr)
    };

    let block = format_report(timestamp, &metrics, &info, &node_table);
    Ok((block, info))
}

/// One full cycle: fetch, format, append (or replace with the error line), scroll.
pub async fn fetch_and_render<S: RedisSource + ?Sized>(
    source: &S,
    pane: &SharedPane,
    local_addr: &str,
) {
    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    match build_report(source, local_addr, &timestamp).await {
        Ok((block, info)) => {
            let mut p = pane.lock().await;
            p.uptime_seconds = info.uptime_seconds;
            p.server_version = info.version;
            p.append(&block);
            p.scroll_to_end();
        }
        Err(e) => {
            warn!("poll cycle failed: {e}");
            pane.lock().await.set_text(&format!("[red]{e}"));
        }
    }
}
