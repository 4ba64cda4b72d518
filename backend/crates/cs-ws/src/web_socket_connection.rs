use crate::{
    ClientFrame, ConnectionConfig, ConnectionId, ControlFrame, ErrorFrame, MessageValidator,
    Metrics, Result as WsErrorResult, RoomBroadcaster, ShutdownGuard, WsError, board_rooms::BoardRooms,
    room_access,
};

use std::panic::Location;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use sqlx::SqlitePool;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Manages a single WebSocket connection
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    user_id: Uuid,
    pool: SqlitePool,
    config: ConnectionConfig,
    metrics: Metrics,
    rooms: BoardRooms,
    broadcaster: RoomBroadcaster,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        user_id: Uuid,
        pool: SqlitePool,
        config: ConnectionConfig,
        metrics: Metrics,
        rooms: BoardRooms,
        broadcaster: RoomBroadcaster,
    ) -> Self {
        Self {
            connection_id,
            user_id,
            pool,
            config,
            metrics,
            rooms,
            broadcaster,
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        rx: mpsc::Receiver<Message>,
        tx: mpsc::Sender<Message>,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        log::info!(
            "WebSocket connection {} established for user {}",
            self.connection_id,
            self.user_id
        );

        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Drain the bounded outgoing channel into the socket. Broadcasts
        // from other connections land here via the registry.
        let mut rx = rx;
        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(msg)) => {
                            if let Err(e) = self.handle_client_message(msg, &tx).await {
                                log::warn!(
                                    "Rejected frame from connection {}: {}",
                                    self.connection_id,
                                    e
                                );
                                self.metrics.error_occurred("bad_frame");
                                self.send_error(&tx, &e).await;
                            }
                        }
                        Some(Err(e)) => {
                            log::error!(
                                "WebSocket error on connection {}: {}",
                                self.connection_id,
                                e
                            );
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            log::info!("Connection {} closed by client", self.connection_id);
                            break Ok(());
                        }
                    }
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    break Ok(());
                }
            }
        };

        // Cleanup: every joined room drops this connection
        self.rooms.leave_all(self.connection_id).await;
        drop(tx); // Close channel to terminate send task
        let _ = send_task.await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });

        log::info!(
            "WebSocket connection {} closed for user {}",
            self.connection_id,
            self.user_id
        );

        result
    }

    /// Handle a message from the client
    async fn handle_client_message(
        &self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        match msg {
            Message::Text(text) => self.handle_frame(text.as_str()).await,
            Message::Binary(_) => Err(WsError::InvalidMessage {
                message: "binary frames are not part of the protocol".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Message::Ping(data) => {
                tx.send(Message::Pong(data))
                    .await
                    .map_err(|_| WsError::SendBufferFull {
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                Ok(())
            }
            Message::Pong(_) => Ok(()),
            Message::Close(_) => {
                log::info!("Received close frame from connection {}", self.connection_id);
                Ok(())
            }
        }
    }

    /// Parse and dispatch one JSON frame
    async fn handle_frame(&self, text: &str) -> WsErrorResult<()> {
        MessageValidator::validate_frame_size(text.len(), self.config.max_frame_bytes)?;

        let frame: ClientFrame =
            serde_json::from_str(text).map_err(|source| WsError::FrameDecode {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        match frame {
            ClientFrame::Control(ControlFrame::JoinBoard { board_id }) => {
                self.handle_join(board_id).await
            }
            ClientFrame::Control(ControlFrame::LeaveBoard { board_id }) => {
                self.metrics.frame_received("leaveBoard");
                self.rooms.leave(board_id, self.connection_id).await;
                Ok(())
            }
            ClientFrame::Event(event) => {
                self.metrics.frame_received(event.kind.as_str());
                MessageValidator::validate_event(&event)?;

                // Only room members may publish into the room
                if !self.rooms.contains(event.board_id, self.connection_id).await {
                    return Err(WsError::NotInRoom {
                        board_id: event.board_id,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }

                self.broadcaster
                    .broadcast(&event, Some(self.connection_id))
                    .await?;
                Ok(())
            }
        }
    }

    async fn handle_join(&self, board_id: Uuid) -> WsErrorResult<()> {
        self.metrics.frame_received("joinBoard");

        if !room_access::can_join(&self.pool, board_id, self.user_id).await? {
            return Err(WsError::Unauthorized {
                message: format!("user {} may not join board {}", self.user_id, board_id),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.rooms.join(board_id, self.connection_id).await;
        self.metrics
            .room_changed("joined", self.rooms.room_size(board_id).await);
        Ok(())
    }

    /// Errors go back to the offending client only, never into the room
    async fn send_error(&self, tx: &mpsc::Sender<Message>, error: &WsError) {
        let frame = ErrorFrame::new(error.error_code(), error.to_string());
        if let Ok(text) = serde_json::to_string(&frame) {
            let _ = tx.try_send(Message::Text(text.into()));
        }
    }
}
