//! In-process synthetic Redis for `--demo`: a small cluster whose counters move
//! on every poll, with an occasional failed fetch.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::client::RedisSource;
use crate::error::SourceError;
use crate::types::{MetricsSnapshot, ServerInfo};

pub const DEMO_ADDR: &str = "demo:7000";

// every Nth metrics call fails, so the error path shows up in a demo run
const FAIL_EVERY: u64 = 17;

const TOPOLOGY: &str = "\
07c37dfeb235213a872192d90877d0cd55635b91 127.0.0.1:7000@17000 myself,master - 0 1426238317239 1 connected 0-5460
e7d1eecce10fd6bb5eb35b9f99a514335d9ba9ca 127.0.0.1:7001@17001 master - 0 1426238316232 2 connected 5461-10922
292f8b365bb7edb5e285caf0b7e6ddc7265d2f4f 127.0.0.1:7002@17002 master - 0 1426238318243 3 connected 10923-16383
6ec23923021cf3ffec47632106199cb7f496ce01 127.0.0.1:7003@17003 slave 07c37dfeb235213a872192d90877d0cd55635b91 0 1426238316232 1 connected
824fe116063bc5fcf9f4ffd895bc17aee7731ac3 127.0.0.1:7004@17004 slave e7d1eecce10fd6bb5eb35b9f99a514335d9ba9ca 0 1426238317741 2 disconnected
truncated-line 127.0.0.1:7005@17005 slave
";

#[derive(Debug, Default)]
pub struct DemoSource {
    calls: AtomicU64,
}

impl DemoSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RedisSource for DemoSource {
    async fn metrics(&self) -> Result<MetricsSnapshot, SourceError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if n % FAIL_EVERY == 0 {
            return Err(SourceError::Unavailable(
                "demo: simulated connection reset".into(),
            ));
        }
        // cheap deterministic wobble so the numbers look alive
        let wobble = (n * 7919) % 97;
        Ok(MetricsSnapshot {
            connected_clients: 40 + wobble % 12,
            total_connections_received: 1_000 + n * 3,
            rejected_connections: n / 50,
            used_memory: 48_000_000 + wobble * 250_000,
            used_memory_rss: 61_000_000 + wobble * 180_000,
            total_commands_processed: 2_500_000 + n * 4_321,
            instantaneous_ops_per_sec: 3_800 + wobble * 13,
            keyspace_hits: 900_000 + n * 3_100,
            keyspace_misses: 120_000 + n * 410,
        })
    }

    async fn info(&self) -> Result<ServerInfo, SourceError> {
        let n = self.calls.load(Ordering::Relaxed);
        Ok(ServerInfo {
            slowlog_len: (n % 9).to_string(),
            total_connections: (1_000 + n * 3).to_string(),
            rejected_connections: (n / 50).to_string(),
            cluster_enabled: true,
            role: "master".into(),
            uptime_seconds: Some(86_400 + 3_600 * 5 + n),
            version: Some("7.2.4".into()),
        })
    }

    async fn cluster_nodes(&self) -> Result<String, SourceError> {
        Ok(TOPOLOGY.to_string())
    }
}
