use crate::{CoreError, Result};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMember {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role: BoardRole,
    pub created_at: DateTime<Utc>,
}

impl BoardMember {
    pub fn new(board_id: Uuid, user_id: Uuid, role: BoardRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            user_id,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn has_permission(&self, required: Permission) -> bool {
        self.role.has_permission(required)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoardRole {
    Admin,
    Member,
    Viewer,
}

impl BoardRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }

    pub fn has_permission(&self, required: Permission) -> bool {
        matches!(
            (self, required),
            (Self::Admin, _)
                | (Self::Member, Permission::View | Permission::Edit)
                | (Self::Viewer, Permission::View)
        )
    }
}

impl FromStr for BoardRole {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            _ => Err(CoreError::InvalidBoardRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for BoardRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Permission {
    View,
    Edit,
    Admin,
}
