use cs_config::WebSocketConfig;

/// Configuration for connection limits
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    /// Maximum connections a single user may hold at once
    pub max_per_user: usize,
    /// Maximum total connections across all users
    pub max_total: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_per_user: 20,
            max_total: 10000,
        }
    }
}

impl From<&WebSocketConfig> for ConnectionLimits {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            max_per_user: config.max_connections_per_user,
            max_total: config.max_connections,
        }
    }
}
