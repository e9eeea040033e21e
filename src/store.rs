//! Redis connection handling and the visit counter.
//!
//! A single `ConnectionManager` is built at startup and shared across all
//! request handlers. Counter atomicity is delegated entirely to Redis INCR;
//! this module performs no local locking or serialization of updates.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::config::{StoreConfig, VISIT_COUNT_KEY};
use crate::error::AppError;

/// The atomic visit counter.
///
/// Implemented over the Redis connection in production; tests substitute
/// in-memory fakes to exercise handlers without a live store.
#[async_trait]
pub trait VisitCounter: Send + Sync {
    /// Atomically advance the counter by one, returning the new value.
    async fn increment(&self) -> Result<i64, AppError>;
}

/// Long-lived Redis client handle.
///
/// `ConnectionManager` is cheap to clone, safe for concurrent callers, and
/// reconnects on its own after transient failures, so a store outage after
/// startup surfaces as per-request errors rather than process death.
#[derive(Clone)]
pub struct CounterStore {
    conn: ConnectionManager,
}

impl CounterStore {
    /// Connect to Redis with the resolved address, credentials, and TLS mode.
    pub async fn connect(config: &StoreConfig) -> Result<Self, AppError> {
        let client = redis::Client::open(connection_info(config))?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }

    /// Liveness probe: one PING round-trip.
    pub async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl VisitCounter for CounterStore {
    async fn increment(&self) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.incr(VISIT_COUNT_KEY, 1).await?)
    }
}

/// Build the connection parameters: database 0, AUTH only when a password is
/// configured, and optionally TLS with certificate validation disabled.
fn connection_info(config: &StoreConfig) -> ConnectionInfo {
    let addr = if config.insecure_tls {
        ConnectionAddr::TcpTls {
            host: config.host.clone(),
            port: config.port,
            insecure: true,
            tls_params: None,
        }
    } else {
        ConnectionAddr::Tcp(config.host.clone(), config.port)
    };

    let (username, password) = if config.password.is_empty() {
        (None, None)
    } else {
        (
            Some(config.username.clone()),
            Some(config.password.clone()),
        )
    };

    ConnectionInfo {
        addr,
        redis: RedisConnectionInfo {
            db: 0,
            username,
            password,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_config() -> StoreConfig {
        StoreConfig {
            host: "localhost".to_string(),
            port: 6379,
            username: "default".to_string(),
            password: String::new(),
            insecure_tls: false,
        }
    }

    #[test]
    fn plain_tcp_by_default() {
        let info = connection_info(&store_config());
        match info.addr {
            ConnectionAddr::Tcp(host, port) => {
                assert_eq!(host, "localhost");
                assert_eq!(port, 6379);
            }
            other => panic!("expected plain TCP address, got {other:?}"),
        }
    }

    #[test]
    fn insecure_tls_when_flagged() {
        let config = StoreConfig {
            insecure_tls: true,
            ..store_config()
        };
        let info = connection_info(&config);
        match info.addr {
            ConnectionAddr::TcpTls {
                host,
                port,
                insecure,
                tls_params,
            } => {
                assert_eq!(host, "localhost");
                assert_eq!(port, 6379);
                assert!(insecure);
                assert!(tls_params.is_none());
            }
            other => panic!("expected TLS address, got {other:?}"),
        }
    }

    #[test]
    fn no_auth_without_password() {
        let info = connection_info(&store_config());
        assert_eq!(info.redis.username, None);
        assert_eq!(info.redis.password, None);
    }

    #[test]
    fn credentials_sent_with_password() {
        let config = StoreConfig {
            username: "tally".to_string(),
            password: "hunter2".to_string(),
            ..store_config()
        };
        let info = connection_info(&config);
        assert_eq!(info.redis.username.as_deref(), Some("tally"));
        assert_eq!(info.redis.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn selects_database_zero() {
        let info = connection_info(&store_config());
        assert_eq!(info.redis.db, 0);
    }

    #[tokio::test]
    async fn connect_fails_against_unreachable_store() {
        let config = StoreConfig {
            host: "127.0.0.1".to_string(),
            // Reserved port, nothing listens here.
            port: 1,
            ..store_config()
        };
        assert!(CounterStore::connect(&config).await.is_err());
    }
}
