use crate::ConnectionId;

use axum::extract::ws::Message;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Information about an active connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub user_id: Uuid,
    pub connected_at: DateTime<Utc>,

    /// Bounded outgoing channel; the connection's send task drains it into
    /// the socket.
    pub sender: mpsc::Sender<Message>,
}
