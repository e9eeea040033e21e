//! Environment configuration and service constants.
//!
//! All settings come from environment variables with defaults, so the service
//! runs with no configuration at all against a local Redis. The insecure-TLS
//! flag is parsed strictly: only the literals `true` and `false` are accepted,
//! anything else is a fatal configuration error.

/// Environment variable naming the Redis host:port.
pub const ENV_REDIS_SERVER: &str = "REDIS_SERVER";
/// Environment variable naming the Redis auth principal.
pub const ENV_REDIS_USERNAME: &str = "REDIS_USERNAME";
/// Environment variable naming the Redis auth secret.
pub const ENV_REDIS_PASSWORD: &str = "REDIS_PASSWORD";
/// Environment variable naming the HTTP listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable enabling TLS to Redis with certificate validation disabled.
pub const ENV_REDIS_INSECURE_TLS: &str = "REDIS_INSECURE_TLS";

pub const DEFAULT_REDIS_SERVER: &str = "localhost:6379";
pub const DEFAULT_REDIS_USERNAME: &str = "default";
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Redis key holding the visit counter.
pub const VISIT_COUNT_KEY: &str = "visit_count";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "tally=debug";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub http: HttpConfig,
}

/// Redis connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Encrypt the connection but accept any certificate. A trust relaxation
    /// for self-signed deployments, not a general TLS policy.
    pub insecure_tls: bool,
}

impl StoreConfig {
    /// host:port form, for logging.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub port: u16,
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(ENV_REDIS_SERVER).unwrap_or_else(|| DEFAULT_REDIS_SERVER.to_string());
        let (host, port) = parse_addr(&addr)?;

        let username =
            lookup(ENV_REDIS_USERNAME).unwrap_or_else(|| DEFAULT_REDIS_USERNAME.to_string());
        let password = lookup(ENV_REDIS_PASSWORD).unwrap_or_default();

        let insecure_tls = match lookup(ENV_REDIS_INSECURE_TLS) {
            Some(raw) => raw.parse::<bool>().map_err(|_| ConfigError::InvalidBool {
                name: ENV_REDIS_INSECURE_TLS,
                value: raw,
            })?,
            None => false,
        };

        let http_port = match lookup(ENV_PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                name: ENV_PORT,
                value: raw,
            })?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Self {
            store: StoreConfig {
                host,
                port,
                username,
                password,
                insecure_tls,
            },
            http: HttpConfig { port: http_port },
        })
    }
}

/// Split a `host:port` address, validating both parts.
fn parse_addr(addr: &str) -> Result<(String, u16), ConfigError> {
    let invalid = || ConfigError::InvalidAddr {
        value: addr.to_string(),
    };
    let (host, port) = addr.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() {
        return Err(invalid());
    }
    let port = port.parse::<u16>().map_err(|_| invalid())?;
    Ok((host.to_string(), port))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("can not parse env variable {name}: {value:?} is not a boolean")]
    InvalidBool { name: &'static str, value: String },
    #[error("can not parse env variable {name}: {value:?} is not a port number")]
    InvalidPort { name: &'static str, value: String },
    #[error("invalid store address {value:?}: expected host:port")]
    InvalidAddr { value: String },
}
