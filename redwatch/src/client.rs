//! Redis access for the monitor: the `RedisSource` seam and a `redis`-crate implementation.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::types::{parse_info, MetricsSnapshot, ServerInfo};

/// Everything the poller needs from a Redis server.
#[async_trait]
pub trait RedisSource: Send + Sync {
    async fn metrics(&self) -> Result<MetricsSnapshot, SourceError>;

    async fn info(&self) -> Result<ServerInfo, SourceError>;

    /// Raw `CLUSTER NODES` reply.
    async fn cluster_nodes(&self) -> Result<String, SourceError>;
}

/// Thin client over a reconnecting `ConnectionManager`.
///
/// Connection and response timeouts are left to the `redis` crate.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    addr: String,
}

impl RedisClient {
    pub async fn connect(url: &str) -> Result<Self, SourceError> {
        let client = redis::Client::open(url)?;
        let addr = client.get_connection_info().addr.to_string();
        let manager = ConnectionManager::new(client).await?;
        info!(%addr, "connected to redis");
        Ok(Self { manager, addr })
    }

    /// `host:port` of the server we connected to.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn raw_info(&self) -> Result<String, SourceError> {
        let mut conn = self.manager.clone();
        let raw: String = redis::cmd("INFO").query_async(&mut conn).await?;
        Ok(raw)
    }
}

#[async_trait]
impl RedisSource for RedisClient {
    async fn metrics(&self) -> Result<MetricsSnapshot, SourceError> {
        let raw = self.raw_info().await?;
        Ok(MetricsSnapshot::from_info(&parse_info(&raw)))
    }

    async fn info(&self) -> Result<ServerInfo, SourceError> {
        let raw = self.raw_info().await?;
        let mut fields = parse_info(&raw);

        // INFO has no slowlog field; fold SLOWLOG LEN in so ServerInfo sees one map.
        let mut conn = self.manager.clone();
        let slowlog: Result<u64, _> = redis::cmd("SLOWLOG").arg("LEN").query_async(&mut conn).await;
        match slowlog {
            Ok(n) => {
                fields.insert("slowlog_len".into(), n.to_string());
            }
            Err(e) => debug!("SLOWLOG LEN failed: {e}"),
        }
        Ok(ServerInfo::from_info(&fields))
    }

    async fn cluster_nodes(&self) -> Result<String, SourceError> {
        let mut conn = self.manager.clone();
        let raw: String = redis::cmd("CLUSTER").arg("NODES").query_async(&mut conn).await?;
        Ok(raw)
    }
}
