//! Text rendering of one poll cycle: the metrics block and the node table.
//!
//! Output carries inline color tags (`[green]`, `[white]`, ...) that
//! [`crate::ui::markup`] turns into styled spans.

use tracing::trace;

use crate::types::{ClusterNodeRecord, MetricsSnapshot, ServerInfo};
use crate::ui::util::human_bytes;

const NODE_TABLE_RULE: &str =
    "────────────────────────────────────────────────────────────────────────────────";

/// Table for a standalone server: one row describing the node we are connected to.
pub fn standalone_node_table(role: &str, addr: &str) -> String {
    format!(
        "  [green]{:<15} {:<10} {:<15} {:<10}[white]\n  {:<15} {:<10} {:<15} {:<10}",
        "Node ID", "Role", "Host:Port", "Status", "localhost", role, addr, "connected"
    )
}

/// Format a raw `CLUSTER NODES` reply. Lines with fewer than 8 fields are skipped.
pub fn cluster_node_table(raw: &str) -> String {
    if raw.is_empty() {
        return "  [yellow]No cluster nodes found[white]".into();
    }

    let mut table = format!(
        "  [green]{:<40} {:<10} {:<20} {:<10}[white]\n",
        "Node ID", "Role", "Host:Port", "Status"
    );
    table.push_str(&format!("  [green]{NODE_TABLE_RULE}[white]\n"));

    for line in raw.lines().filter(|l| !l.trim().is_empty()) {
        let Some(node) = ClusterNodeRecord::parse(line) else {
            trace!("skipping short cluster line: {line:?}");
            continue;
        };
        let status = if node.is_connected() {
            "[green]connected[white]".to_string()
        } else {
            format!("[red]{}[white]", node.link_state)
        };
        table.push_str(&format!(
            "  {:<40} {:<10} {:<20} {}\n",
            node.short_id(),
            node.role_label(),
            node.host_port(),
            status
        ));
    }
    table
}

pub fn cluster_error_table() -> String {
    "  [red]Error getting cluster nodes info[white]".into()
}

/// The multi-section block appended to the scrollback on every successful cycle.
pub fn format_report(
    timestamp: &str,
    m: &MetricsSnapshot,
    info: &ServerInfo,
    node_table: &str,
) -> String {
    format!(
        "[yellow]{timestamp}[white] - Redis Metrics:

[cyan]━━━ Client Connections ━━━[white]
  [green]Connected Clients:[white] {clients}
  [green]Total Connections:[white] {total_conn}
  [green]Rejected Connections:[white] {rejected}

[cyan]━━━ Memory Usage ━━━[white]
  [green]Used Memory:[white] {used}
  [green]Used Memory RSS:[white] {rss}

[cyan]━━━ Command Statistics ━━━[white]
  [green]Total Commands:[white] {cmds}
  [green]Ops/sec:[white] {ops}
  [green]Keyspace Hits:[white] {hits}
  [green]Keyspace Misses:[white] {misses}
  [green]Hit Rate:[white] {hit_rate:.2}%

[cyan]━━━ Slow Queries Log ━━━[white]
  [green]Slow Log Length:[white] {slowlog}

[cyan]━━━ Nodes ━━━[white]
{node_table}

",
        clients = m.connected_clients,
        total_conn = info.total_connections,
        rejected = info.rejected_connections,
        used = human_bytes(m.used_memory),
        rss = human_bytes(m.used_memory_rss),
        cmds = m.total_commands_processed,
        ops = m.instantaneous_ops_per_sec,
        hits = m.keyspace_hits,
        misses = m.keyspace_misses,
        hit_rate = m.hit_rate(),
        slowlog = info.slowlog_len,
    )
}
