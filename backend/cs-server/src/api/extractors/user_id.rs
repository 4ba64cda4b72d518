//! Axum extractors for REST API authentication

use crate::ApiError;

use cs_ws::AppState;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;
use uuid::Uuid;

/// Extracts the verified user identity from the `X-User-Id` header.
///
/// Authentication happens upstream; by the time a request reaches this
/// server the header carries a trusted user id. A missing or malformed
/// header is rejected with 401.
pub struct UserId(pub Uuid);

impl FromRequestParts<AppState> for UserId {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header_value = parts.headers.get("X-User-Id").ok_or_else(|| {
                ApiError::Unauthorized {
                    message: "Missing X-User-Id header".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let user_id_str = header_value.to_str().map_err(|_| ApiError::Unauthorized {
                message: "Invalid X-User-Id header".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let uuid = Uuid::parse_str(user_id_str).map_err(|_| {
                log::warn!("Malformed UUID in X-User-Id header: {}", user_id_str);
                ApiError::Unauthorized {
                    message: "Invalid X-User-Id header".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            log::debug!("Request from user {}", uuid);
            Ok(UserId(uuid))
        }
    }
}
