use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Frame decode failed: {source} {location}")]
    FrameDecode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Event encode failed: {source} {location}")]
    EventEncode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Send buffer full, client too slow {location}")]
    SendBufferFull { location: ErrorLocation },

    #[error("Connection limit exceeded: {current} connections (max: {max}) {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Invalid message: {message} {location}")]
    InvalidMessage {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not a member of board room {board_id} {location}")]
    NotInRoom {
        board_id: uuid::Uuid,
        location: ErrorLocation,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Storage error: {source} {location}")]
    Db {
        #[source]
        source: cs_db::DbError,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Error code sent back to the client in an error frame.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::FrameDecode { .. } => "DECODE_ERROR",
            Self::EventEncode { .. } => "ENCODE_ERROR",
            Self::SendBufferFull { .. } => "SLOW_CLIENT",
            Self::ConnectionLimitExceeded { .. } => "CONNECTION_LIMIT",
            Self::InvalidMessage { .. } => "INVALID_MESSAGE",
            Self::NotInRoom { .. } => "NOT_IN_ROOM",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Db { .. } => "INTERNAL_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<cs_db::DbError> for WsError {
    #[track_caller]
    fn from(source: cs_db::DbError) -> Self {
        Self::Db {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
