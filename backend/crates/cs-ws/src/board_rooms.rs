use crate::ConnectionId;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Room membership for board broadcast fan-out.
///
/// A connection may sit in several rooms at once (a user with two boards
/// open in two tabs shares one connection per tab, but a dashboard view may
/// watch several boards). Membership is tracked both ways so a closing
/// connection can leave all of its rooms in one call.
pub struct BoardRooms {
    inner: Arc<RwLock<RoomsInner>>,
}

#[derive(Default)]
struct RoomsInner {
    /// Connections in each board room
    rooms: HashMap<Uuid, HashSet<ConnectionId>>,
    /// Rooms each connection has joined
    joined: HashMap<ConnectionId, HashSet<Uuid>>,
}

impl BoardRooms {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RoomsInner::default())),
        }
    }

    /// Add the connection to a board room. Joining twice is a no-op.
    pub async fn join(&self, board_id: Uuid, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;
        inner.rooms.entry(board_id).or_default().insert(connection_id);
        inner.joined.entry(connection_id).or_default().insert(board_id);

        log::debug!(
            "Connection {} joined board room {} ({} in room)",
            connection_id,
            board_id,
            inner.rooms[&board_id].len()
        );
    }

    /// Remove the connection from a board room. Empty rooms are dropped.
    pub async fn leave(&self, board_id: Uuid, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;
        inner.remove(board_id, connection_id);

        if let Some(joined) = inner.joined.get_mut(&connection_id) {
            joined.remove(&board_id);
            if joined.is_empty() {
                inner.joined.remove(&connection_id);
            }
        }
    }

    /// Remove the connection from every room it joined, returning the board
    /// ids it was in. Called when the connection closes.
    pub async fn leave_all(&self, connection_id: ConnectionId) -> Vec<Uuid> {
        let mut inner = self.inner.write().await;

        let boards: Vec<Uuid> = inner
            .joined
            .remove(&connection_id)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();

        for board_id in &boards {
            inner.remove(*board_id, connection_id);
        }

        if !boards.is_empty() {
            log::debug!(
                "Connection {} left {} board room(s) on close",
                connection_id,
                boards.len()
            );
        }

        boards
    }

    /// Whether the connection has joined the given board room.
    pub async fn contains(&self, board_id: Uuid, connection_id: ConnectionId) -> bool {
        let inner = self.inner.read().await;
        inner
            .rooms
            .get(&board_id)
            .is_some_and(|room| room.contains(&connection_id))
    }

    /// Current members of a board room.
    pub async fn members(&self, board_id: Uuid) -> Vec<ConnectionId> {
        let inner = self.inner.read().await;
        inner
            .rooms
            .get(&board_id)
            .map(|room| room.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of connections in a board room.
    pub async fn room_size(&self, board_id: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner.rooms.get(&board_id).map_or(0, HashSet::len)
    }

    /// Number of non-empty rooms.
    pub async fn room_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.rooms.len()
    }
}

impl RoomsInner {
    fn remove(&mut self, board_id: Uuid, connection_id: ConnectionId) {
        if let Some(room) = self.rooms.get_mut(&board_id) {
            room.remove(&connection_id);
            if room.is_empty() {
                self.rooms.remove(&board_id);
                log::debug!("Removed empty board room {}", board_id);
            }
        }
    }
}

impl Default for BoardRooms {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BoardRooms {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
