pub mod app_state;
pub mod board_rooms;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod error;
pub mod message_validator;
pub mod metrics;
pub mod realtime_event;
pub mod room_access;
pub mod room_broadcaster;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use board_rooms::BoardRooms;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use error::{Result, WsError};
pub use message_validator::MessageValidator;
pub use metrics::Metrics;
pub use realtime_event::{ClientFrame, ControlFrame, ErrorFrame, EventKind, RealtimeEvent};
pub use room_broadcaster::RoomBroadcaster;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;
