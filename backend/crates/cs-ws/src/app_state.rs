use crate::{
    BoardRooms, ConnectionConfig, ConnectionRegistry, Metrics, RoomBroadcaster,
    ShutdownCoordinator, WebSocketConnection,
};

use cs_db::ContainerLocks;

use std::str::FromStr;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::Response,
};
use log::{debug, error, info, warn};
use sqlx::SqlitePool;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Shared application state for WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub registry: ConnectionRegistry,
    pub rooms: BoardRooms,
    pub broadcaster: RoomBroadcaster,
    pub locks: ContainerLocks,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, registry: ConnectionRegistry, config: ConnectionConfig) -> Self {
        let rooms = BoardRooms::new();
        let metrics = Metrics::new();
        let broadcaster = RoomBroadcaster::new(registry.clone(), rooms.clone(), metrics.clone());

        Self {
            pool,
            registry,
            rooms,
            broadcaster,
            locks: ContainerLocks::new(),
            metrics,
            shutdown: ShutdownCoordinator::new(),
            config,
        }
    }
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    // The upstream auth layer verifies identity and passes it along
    let user_id = extract_user_id(&headers)?;
    debug!("WebSocket upgrade request from user {}", user_id);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, user_id, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, user_id: Uuid, state: AppState) {
    // Bounded channel for outgoing messages (backpressure handling)
    let (tx, rx) = mpsc::channel::<Message>(state.config.send_buffer_size);

    // Register connection (enforces connection limits)
    let connection_id = match state.registry.register(user_id, tx.clone()).await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to register connection: {}", e);
            state.metrics.error_occurred("connection_limit");
            return;
        }
    };

    info!("Registered connection {}", connection_id);

    let shutdown_guard = state.shutdown.subscribe_guard();
    let connection = WebSocketConnection::new(
        connection_id,
        user_id,
        state.pool.clone(),
        state.config.clone(),
        state.metrics.clone(),
        state.rooms.clone(),
        state.broadcaster.clone(),
    );

    let result = connection.handle(socket, rx, tx, shutdown_guard).await;

    // Unregister on disconnect
    state.registry.unregister(connection_id).await;

    if let Err(e) = result {
        error!("Connection {connection_id} error: {e}");
    }
}

/// Extract the verified user identity from the X-User-Id header
fn extract_user_id(headers: &HeaderMap) -> Result<Uuid, StatusCode> {
    let value = headers
        .get("x-user-id")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing X-User-Id header");
            StatusCode::UNAUTHORIZED
        })?;

    Uuid::from_str(value).map_err(|_| {
        warn!("Malformed X-User-Id header");
        StatusCode::UNAUTHORIZED
    })
}
