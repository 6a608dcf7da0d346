//! Types for what we read out of Redis: counters, INFO fields, cluster node lines.

use std::collections::HashMap;

/// Point-in-time server counters. Not retained after a cycle is formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub connected_clients: u64,
    pub total_connections_received: u64,
    pub rejected_connections: u64,
    pub used_memory: u64,
    pub used_memory_rss: u64,
    pub total_commands_processed: u64,
    pub instantaneous_ops_per_sec: u64,
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
}

impl MetricsSnapshot {
    /// Build from parsed INFO pairs; missing or non-numeric fields read as 0.
    pub fn from_info(fields: &HashMap<String, String>) -> Self {
        let num = |key: &str| {
            fields
                .get(key)
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0)
        };
        Self {
            connected_clients: num("connected_clients"),
            total_connections_received: num("total_connections_received"),
            rejected_connections: num("rejected_connections"),
            used_memory: num("used_memory"),
            used_memory_rss: num("used_memory_rss"),
            total_commands_processed: num("total_commands_processed"),
            instantaneous_ops_per_sec: num("instantaneous_ops_per_sec"),
            keyspace_hits: num("keyspace_hits"),
            keyspace_misses: num("keyspace_misses"),
        }
    }

    /// Keyspace hit rate in percent; 0 when there were no lookups at all.
    pub fn hit_rate(&self) -> f64 {
        let total = self.keyspace_hits.saturating_add(self.keyspace_misses);
        if total == 0 {
            return 0.0;
        }
        self.keyspace_hits as f64 / total as f64 * 100.0
    }
}

/// The handful of INFO fields the monitor pane shows next to the counters.
///
/// Counters are kept as the text the server reported so an odd value is shown
/// verbatim; absent keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub slowlog_len: String,
    pub total_connections: String,
    pub rejected_connections: String,
    pub cluster_enabled: bool,
    pub role: String,
    pub uptime_seconds: Option<u64>,
    pub version: Option<String>,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            slowlog_len: "0".into(),
            total_connections: "0".into(),
            rejected_connections: "0".into(),
            cluster_enabled: false,
            role: "master".into(),
            uptime_seconds: None,
            version: None,
        }
    }
}

impl ServerInfo {
    pub fn from_info(fields: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            fields
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or(default)
        };
        Self {
            slowlog_len: text("slowlog_len", defaults.slowlog_len),
            total_connections: text("total_connections_received", defaults.total_connections),
            rejected_connections: text("rejected_connections", defaults.rejected_connections),
            cluster_enabled: fields.get("cluster_enabled").map(String::as_str) == Some("1"),
            role: text("role", defaults.role),
            uptime_seconds: fields
                .get("uptime_in_seconds")
                .and_then(|v| v.parse().ok()),
            version: fields.get("redis_version").cloned(),
        }
    }
}

/// Parse `INFO` output: `key:value` lines, skipping `# Section` headers and blanks.
pub fn parse_info(raw: &str) -> HashMap<String, String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Minimum field count for a `CLUSTER NODES` line to be usable.
pub const CLUSTER_NODE_MIN_FIELDS: usize = 8;

/// One line of `CLUSTER NODES`:
/// `<id> <ip:port@cport> <flags> <master> <ping-sent> <pong-recv> <config-epoch> <link-state> <slot>...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterNodeRecord {
    pub id: String,
    pub addr: String,
    pub flags: String,
    pub link_state: String,
}

impl ClusterNodeRecord {
    /// Returns `None` for lines with fewer than 8 fields.
    pub fn parse(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < CLUSTER_NODE_MIN_FIELDS {
            return None;
        }
        Some(Self {
            id: parts[0].to_string(),
            addr: parts[1].to_string(),
            flags: parts[2].to_string(),
            link_state: parts[7].to_string(),
        })
    }

    /// First 8 characters of the id followed by `...`.
    pub fn short_id(&self) -> String {
        let head: String = self.id.chars().take(8).collect();
        format!("{head}...")
    }

    /// `host:port` without the cluster bus port.
    pub fn host_port(&self) -> &str {
        self.addr.split('@').next().unwrap_or(&self.addr)
    }

    pub fn is_master(&self) -> bool {
        self.flags.contains("master")
    }

    pub fn is_myself(&self) -> bool {
        self.flags.contains("myself")
    }

    /// `master`/`slave`, with ` (self)` appended for the node we are talking to.
    pub fn role_label(&self) -> String {
        let mut role = if self.is_master() { "master" } else { "slave" }.to_string();
        if self.is_myself() {
            role.push_str(" (self)");
        }
        role
    }

    pub fn is_connected(&self) -> bool {
        self.link_state == "connected"
    }
}
