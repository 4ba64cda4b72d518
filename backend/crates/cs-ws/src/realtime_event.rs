use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened on the board. The discriminant doubles as the wire `type`
/// field, camel-cased to match what clients emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    TaskMoved,
    ListCreated,
    ListUpdated,
    ListDeleted,
    BoardUpdated,
    MemberAdded,
    MemberRemoved,
    Typing,
    StopTyping,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskCreated => "taskCreated",
            Self::TaskUpdated => "taskUpdated",
            Self::TaskDeleted => "taskDeleted",
            Self::TaskMoved => "taskMoved",
            Self::ListCreated => "listCreated",
            Self::ListUpdated => "listUpdated",
            Self::ListDeleted => "listDeleted",
            Self::BoardUpdated => "boardUpdated",
            Self::MemberAdded => "memberAdded",
            Self::MemberRemoved => "memberRemoved",
            Self::Typing => "typing",
            Self::StopTyping => "stopTyping",
        }
    }
}

/// A board event relayed to everyone in the room except its origin.
///
/// The payload is carried opaquely: the server fans it out but does not
/// interpret it, so clients stay free to evolve the event bodies without a
/// server change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub board_id: Uuid,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl RealtimeEvent {
    pub fn new(kind: EventKind, board_id: Uuid, payload: serde_json::Value) -> Self {
        Self {
            kind,
            board_id,
            payload,
        }
    }
}

/// Room membership control frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlFrame {
    #[serde(rename_all = "camelCase")]
    JoinBoard { board_id: Uuid },
    #[serde(rename_all = "camelCase")]
    LeaveBoard { board_id: Uuid },
}

/// Any frame a client may send: a room control frame or a board event to
/// relay. Control frames are tried first; everything else must parse as an
/// event.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClientFrame {
    Control(ControlFrame),
    Event(RealtimeEvent),
}

/// Error frame sent back to the offending client only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFrame {
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    pub message: String,
}

impl ErrorFrame {
    pub fn new(code: &str, message: String) -> Self {
        Self {
            kind: "error".to_string(),
            code: code.to_string(),
            message,
        }
    }
}
