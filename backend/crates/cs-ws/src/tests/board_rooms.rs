use crate::{BoardRooms, ConnectionId};

use uuid::Uuid;

#[tokio::test]
async fn given_new_rooms_when_created_then_empty() {
    let rooms = BoardRooms::new();
    assert_eq!(rooms.room_count().await, 0);
    assert_eq!(rooms.room_size(Uuid::new_v4()).await, 0);
}

#[tokio::test]
async fn given_connection_when_joined_then_is_member() {
    let rooms = BoardRooms::new();
    let board = Uuid::new_v4();
    let conn = ConnectionId::new();

    rooms.join(board, conn).await;

    assert!(rooms.contains(board, conn).await);
    assert_eq!(rooms.room_size(board).await, 1);
}

#[tokio::test]
async fn given_member_when_joined_twice_then_counted_once() {
    let rooms = BoardRooms::new();
    let board = Uuid::new_v4();
    let conn = ConnectionId::new();

    rooms.join(board, conn).await;
    rooms.join(board, conn).await;

    assert_eq!(rooms.room_size(board).await, 1);
}

#[tokio::test]
async fn given_member_when_left_then_not_member_and_empty_room_dropped() {
    let rooms = BoardRooms::new();
    let board = Uuid::new_v4();
    let conn = ConnectionId::new();

    rooms.join(board, conn).await;
    rooms.leave(board, conn).await;

    assert!(!rooms.contains(board, conn).await);
    assert_eq!(rooms.room_count().await, 0);
}

#[tokio::test]
async fn given_connection_in_several_rooms_when_leave_all_then_every_room_vacated() {
    let rooms = BoardRooms::new();
    let board_a = Uuid::new_v4();
    let board_b = Uuid::new_v4();
    let conn = ConnectionId::new();
    let other = ConnectionId::new();

    rooms.join(board_a, conn).await;
    rooms.join(board_b, conn).await;
    rooms.join(board_b, other).await;

    let left = rooms.leave_all(conn).await;

    assert_eq!(left.len(), 2);
    assert!(!rooms.contains(board_a, conn).await);
    assert!(!rooms.contains(board_b, conn).await);
    // The other connection keeps board_b alive
    assert!(rooms.contains(board_b, other).await);
    assert_eq!(rooms.room_count().await, 1);
}

#[tokio::test]
async fn given_room_with_members_when_listing_then_all_present() {
    let rooms = BoardRooms::new();
    let board = Uuid::new_v4();
    let a = ConnectionId::new();
    let b = ConnectionId::new();

    rooms.join(board, a).await;
    rooms.join(board, b).await;

    let members = rooms.members(board).await;
    assert_eq!(members.len(), 2);
    assert!(members.contains(&a));
    assert!(members.contains(&b));
}
