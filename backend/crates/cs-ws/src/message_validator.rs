use crate::{RealtimeEvent, Result as WsErrorResult, WsError};

use std::panic::Location;

use error_location::ErrorLocation;

/// Validates frames from clients before they touch rooms or fan-out
pub struct MessageValidator;

impl MessageValidator {
    /// Reject frames over the configured size before parsing them
    #[track_caller]
    pub fn validate_frame_size(len: usize, max_frame_bytes: usize) -> WsErrorResult<()> {
        if len > max_frame_bytes {
            return Err(WsError::InvalidMessage {
                message: format!("frame of {} bytes exceeds maximum ({})", len, max_frame_bytes),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Sanity-check a relayed event's payload
    #[track_caller]
    pub fn validate_event(event: &RealtimeEvent) -> WsErrorResult<()> {
        if event.board_id.is_nil() {
            return Err(WsError::InvalidMessage {
                message: "boardId cannot be nil".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Payloads are opaque but must still be objects or null; a client
        // sending scalars is a protocol bug.
        match &event.payload {
            serde_json::Value::Object(_) | serde_json::Value::Null => Ok(()),
            _ => Err(WsError::InvalidMessage {
                message: "payload must be an object".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
