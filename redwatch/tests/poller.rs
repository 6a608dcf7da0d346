//! Poll-cycle behavior against a scripted source: short-circuiting, idempotent
//! start/stop, key routing, and scrollback trimming.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use redwatch::client::RedisSource;
use redwatch::error::SourceError;
use redwatch::history::MAX_LINES;
use redwatch::pane::MonitorPane;
use redwatch::poller::{fetch_and_render, MetricsPoller};
use redwatch::types::{MetricsSnapshot, ServerInfo};

const TOPOLOGY: &str = "abcdefgh12345 127.0.0.1:7000@17000 master,myself - 0 0 1 connected 0-5460
ijklmnop67890 127.0.0.1:7001@17001 slave abcdefgh12345 0 0 1 connected
short line only five
";

#[derive(Default)]
struct ScriptedSource {
    fail_metrics: AtomicBool,
    fail_info: AtomicBool,
    cluster: bool,
    metrics_delay: Option<Duration>,
    metrics_calls: AtomicUsize,
    info_calls: AtomicUsize,
    cluster_calls: AtomicUsize,
}

impl ScriptedSource {
    fn clustered() -> Self {
        Self {
            cluster: true,
            ..Default::default()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            metrics_delay: Some(delay),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RedisSource for ScriptedSource {
    async fn metrics(&self) -> Result<MetricsSnapshot, SourceError> {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.metrics_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_metrics.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("connection refused".into()));
        }
        Ok(MetricsSnapshot {
            connected_clients: 3,
            keyspace_hits: 80,
            keyspace_misses: 20,
            ..Default::default()
        })
    }

    async fn info(&self) -> Result<ServerInfo, SourceError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_info.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("broken pipe".into()));
        }
        Ok(ServerInfo {
            cluster_enabled: self.cluster,
            slowlog_len: "4".into(),
            ..Default::default()
        })
    }

    async fn cluster_nodes(&self) -> Result<String, SourceError> {
        self.cluster_calls.fetch_add(1, Ordering::SeqCst);
        Ok(TOPOLOGY.to_string())
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn poller(src: &Arc<ScriptedSource>) -> MetricsPoller<ScriptedSource> {
    MetricsPoller::new(Arc::clone(src), MonitorPane::shared(), "127.0.0.1:6379")
}

#[tokio::test]
async fn metrics_failure_short_circuits_cycle() {
    let src = Arc::new(ScriptedSource::clustered());
    let p = poller(&src);
    p.refresh().await;
    let before = p.pane().lock().await.text();
    assert!(before.contains("Redis Metrics:"));

    src.fail_metrics.store(true, Ordering::SeqCst);
    p.refresh().await;

    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 2);
    assert_eq!(src.info_calls.load(Ordering::SeqCst), 1);
    assert_eq!(src.cluster_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        p.pane().lock().await.text(),
        "[red]Error loading metrics: connection refused"
    );
}

#[tokio::test]
async fn info_failure_skips_cluster_fetch() {
    let src = Arc::new(ScriptedSource::clustered());
    src.fail_info.store(true, Ordering::SeqCst);
    let pane = MonitorPane::shared();
    fetch_and_render(src.as_ref(), &pane, "127.0.0.1:6379").await;

    assert_eq!(src.cluster_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        pane.lock().await.text(),
        "[red]Error loading Redis info: broken pipe"
    );
}

#[tokio::test]
async fn cluster_rows_rendered_and_short_lines_dropped() {
    let src = Arc::new(ScriptedSource::clustered());
    let pane = MonitorPane::shared();
    fetch_and_render(src.as_ref(), &pane, "unused:1").await;

    let text = pane.lock().await.text();
    assert!(text.contains("abcdefgh..."));
    assert!(text.contains("master (self)"));
    assert!(text.contains("ijklmnop..."));
    assert!(!text.contains("short..."));
    assert!(text.contains("Hit Rate:[white] 80.00%"));
    assert!(text.contains("Slow Log Length:[white] 4"));
    assert!(!text.contains("unused:1"));
}

#[tokio::test]
async fn standalone_uses_local_address() {
    let src = Arc::new(ScriptedSource::default());
    let pane = MonitorPane::shared();
    fetch_and_render(src.as_ref(), &pane, "10.1.2.3:6380").await;

    assert_eq!(src.cluster_calls.load(Ordering::SeqCst), 0);
    let text = pane.lock().await.text();
    assert!(text.contains("localhost"));
    assert!(text.contains("10.1.2.3:6380"));
}

#[tokio::test]
async fn scrollback_capped_after_many_cycles() {
    let src = Arc::new(ScriptedSource::clustered());
    let p = poller(&src);
    for _ in 0..5 {
        p.refresh().await;
    }
    let pane = p.pane().lock().await;
    assert_eq!(pane.buffer().len(), MAX_LINES);
    assert!(pane.is_following());
    // the newest block ends with the node table and its trailing blank line
    assert_eq!(pane.buffer().lines().last(), Some(""));
}

#[tokio::test(start_paused = true)]
async fn start_twice_runs_one_loop() {
    let src = Arc::new(ScriptedSource::default());
    let mut p = poller(&src);

    assert!(p.start().await);
    assert!(!p.start().await);
    assert!(p.is_monitoring());
    assert_eq!(p.pane().lock().await.title(), "Real-time Monitoring [ACTIVE]");

    // first tick lands one period after start
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn stop_ends_loop_and_is_idempotent() {
    let src = Arc::new(ScriptedSource::default());
    let mut p = poller(&src);

    assert!(!p.stop().await, "stop while stopped is a no-op");
    p.start().await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(p.stop().await);
    assert!(!p.stop().await);
    assert!(!p.is_monitoring());
    assert_eq!(p.pane().lock().await.title(), "Real-time Monitoring [STOPPED]");

    let calls = src.metrics_calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), calls);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_cycle_in_flight() {
    let src = Arc::new(ScriptedSource::slow(Duration::from_millis(500)));
    let mut p = poller(&src);
    p.start().await;

    // the first tick fires at 1s; its metrics call is still pending at 1.2s
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 1);
    assert!(p.stop().await);
    p.clear().await;

    tokio::time::sleep(Duration::from_secs(3)).await;
    let pane = p.pane().lock().await;
    assert!(pane.text().is_empty(), "late cycle rendered:\n{}", pane.text());
    assert_eq!(pane.title(), "Real-time Monitoring [STOPPED]");
    assert_eq!(src.info_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn restart_mid_cycle_renders_only_new_loop() {
    let src = Arc::new(ScriptedSource::slow(Duration::from_millis(500)));
    let mut p = poller(&src);
    p.start().await;
    tokio::time::sleep(Duration::from_millis(1200)).await;
    p.stop().await;
    p.start().await;

    // new loop ticks at 2.2s and finishes its fetch at 2.7s
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 2);
    assert_eq!(src.info_calls.load(Ordering::SeqCst), 1);
    let text = p.pane().lock().await.text();
    assert_eq!(text.matches("Redis Metrics:").count(), 1);
}

#[tokio::test(start_paused = true)]
async fn restart_creates_fresh_loop() {
    let src = Arc::new(ScriptedSource::default());
    let mut p = poller(&src);
    p.start().await;
    p.stop().await;
    p.start().await;
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn key_routing() {
    let src = Arc::new(ScriptedSource::default());
    let mut p = poller(&src);

    assert!(p.handle_key(key('s')).await.is_none());
    assert!(p.is_monitoring());
    assert!(p.handle_key(key('S')).await.is_none());
    assert!(!p.is_monitoring());

    assert!(p.handle_key(key('r')).await.is_none());
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 1);
    assert!(!p.pane().lock().await.text().is_empty());

    assert!(p.handle_key(key('C')).await.is_none());
    assert!(p.pane().lock().await.text().is_empty());

    let passed = p.handle_key(key('x')).await;
    assert_eq!(passed, Some(key('x')));
    assert_eq!(p.handle_key(key('1')).await, Some(key('1')));

    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(p.handle_key(ctrl_c).await, Some(ctrl_c));
}

#[tokio::test(start_paused = true)]
async fn clear_keeps_monitoring() {
    let src = Arc::new(ScriptedSource::default());
    let mut p = poller(&src);
    p.refresh().await;
    p.start().await;
    p.clear().await;
    assert!(p.is_monitoring());
    assert!(p.pane().lock().await.text().is_empty());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(p.pane().lock().await.text().contains("Redis Metrics:"));
}

#[tokio::test(start_paused = true)]
async fn failing_ticks_do_not_stop_monitoring() {
    let src = Arc::new(ScriptedSource::default());
    src.fail_metrics.store(true, Ordering::SeqCst);
    let mut p = poller(&src);
    p.start().await;
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(src.metrics_calls.load(Ordering::SeqCst), 3);
    assert!(p.is_monitoring());
    assert_eq!(
        p.pane().lock().await.text(),
        "[red]Error loading metrics: connection refused"
    );
}
