//! Server configuration from the environment.

use std::time::Duration;

use courier_core::app::DispatchConfig;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub dispatch: DispatchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read overrides from `COURIER_ADDR`, `COURIER_TICK_SECS` and
    /// `COURIER_BATCH_SIZE`; anything unset or unparsable keeps its
    /// default.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("COURIER_ADDR").ok(),
            std::env::var("COURIER_TICK_SECS").ok(),
            std::env::var("COURIER_BATCH_SIZE").ok(),
        )
    }

    fn from_vars(addr: Option<String>, tick_secs: Option<String>, batch_size: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(addr) = addr {
            config.addr = addr;
        }
        if let Some(secs) = tick_secs.and_then(|v| v.parse::<u64>().ok()) {
            config.dispatch.tick_interval = Duration::from_secs(secs);
        }
        if let Some(size) = batch_size.and_then(|v| v.parse::<usize>().ok()) {
            config.dispatch.batch_size = size;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dispatch_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.dispatch.tick_interval, Duration::from_secs(120));
        assert_eq!(config.dispatch.batch_size, 2);
    }

    #[test]
    fn vars_override_defaults() {
        let config = ServerConfig::from_vars(
            Some("127.0.0.1:9000".to_string()),
            Some("30".to_string()),
            Some("10".to_string()),
        );
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.dispatch.tick_interval, Duration::from_secs(30));
        assert_eq!(config.dispatch.batch_size, 10);
    }

    #[test]
    fn unparsable_vars_keep_defaults() {
        let config = ServerConfig::from_vars(None, Some("soon".to_string()), Some("-1".to_string()));
        assert_eq!(config.dispatch.tick_interval, Duration::from_secs(120));
        assert_eq!(config.dispatch.batch_size, 2);
    }
}
