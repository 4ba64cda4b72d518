use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Send buffer size constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

// Frame size constraints (bytes)
pub const MIN_FRAME_BYTES: usize = 1024;
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;
pub const DEFAULT_FRAME_BYTES: usize = 64 * 1024;

// Connection count constraints
pub const DEFAULT_MAX_CONNECTIONS: usize = 10000;
pub const DEFAULT_MAX_CONNECTIONS_PER_USER: usize = 20;

/// WebSocket connection settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Send buffer size
    pub send_buffer_size: usize,
    /// Largest accepted client frame, in bytes
    pub max_frame_bytes: usize,
    /// Maximum total connections
    pub max_connections: usize,
    /// Maximum connections per user
    pub max_connections_per_user: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            max_frame_bytes: DEFAULT_FRAME_BYTES,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_connections_per_user: DEFAULT_MAX_CONNECTIONS_PER_USER,
        }
    }
}

impl WebSocketConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "websocket.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if self.max_frame_bytes < MIN_FRAME_BYTES || self.max_frame_bytes > MAX_FRAME_BYTES {
            return Err(ConfigError::config(format!(
                "websocket.max_frame_bytes must be {}-{}, got {}",
                MIN_FRAME_BYTES, MAX_FRAME_BYTES, self.max_frame_bytes
            )));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::config(
                "websocket.max_connections must be greater than 0",
            ));
        }

        if self.max_connections_per_user == 0
            || self.max_connections_per_user > self.max_connections
        {
            return Err(ConfigError::config(format!(
                "websocket.max_connections_per_user must be 1-{}, got {}",
                self.max_connections, self.max_connections_per_user
            )));
        }

        Ok(())
    }
}
