use crate::{BoardRooms, ConnectionId, ConnectionRegistry, Metrics, RealtimeEvent, Result, WsError};

use std::panic::Location;

use axum::extract::ws::Message;
use error_location::ErrorLocation;

/// Fans a board event out to everyone in the room except its origin.
///
/// Delivery is fire-and-forget: a member whose send buffer is full misses
/// the event and recovers by re-fetching the board snapshot, the same way it
/// recovers from any other gap. One slow client never blocks the room.
pub struct RoomBroadcaster {
    registry: ConnectionRegistry,
    rooms: BoardRooms,
    metrics: Metrics,
}

impl RoomBroadcaster {
    pub fn new(registry: ConnectionRegistry, rooms: BoardRooms, metrics: Metrics) -> Self {
        Self {
            registry,
            rooms,
            metrics,
        }
    }

    /// Relay `event` to the board room, excluding `origin`. Returns how many
    /// members the event was handed to.
    pub async fn broadcast(
        &self,
        event: &RealtimeEvent,
        origin: Option<ConnectionId>,
    ) -> Result<usize> {
        let text = serde_json::to_string(event).map_err(|source| WsError::EventEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let members: Vec<ConnectionId> = self
            .rooms
            .members(event.board_id)
            .await
            .into_iter()
            .filter(|id| Some(*id) != origin)
            .collect();

        let mut delivered = 0;
        for sender in self.registry.senders(&members).await {
            match sender.try_send(Message::Text(text.clone().into())) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    // Buffer full or receiver gone; the member catches up
                    // from a snapshot.
                    log::warn!(
                        "Dropped {} event for a member of board {}",
                        event.kind.as_str(),
                        event.board_id
                    );
                    self.metrics.error_occurred("slow_client");
                }
            }
        }

        log::debug!(
            "Broadcast {} to board {} ({} of {} members)",
            event.kind.as_str(),
            event.board_id,
            delivered,
            members.len()
        );
        self.metrics.broadcast_published(event.kind.as_str(), delivered);

        Ok(delivered)
    }
}

impl Clone for RoomBroadcaster {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            rooms: self.rooms.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
