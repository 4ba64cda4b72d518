//! Shared helpers for mapping TEXT/INTEGER columns back to domain types.

use crate::{DbError, Result};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use uuid::Uuid;

#[track_caller]
pub(crate) fn uuid_field(column: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| DbError::decode(format!("invalid UUID in {}: {}", column, e)))
}

#[track_caller]
pub(crate) fn uuid_field_opt(column: &str, value: Option<&str>) -> Result<Option<Uuid>> {
    value.map(|v| uuid_field(column, v)).transpose()
}

#[track_caller]
pub(crate) fn timestamp_field(column: &str, value: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(value, 0)
        .ok_or_else(|| DbError::decode(format!("invalid timestamp in {}", column)))
}

#[track_caller]
pub(crate) fn json_field<T: DeserializeOwned>(column: &str, value: &str) -> Result<T> {
    serde_json::from_str(value)
        .map_err(|e| DbError::decode(format!("invalid JSON in {}: {}", column, e)))
}
