//! Region members.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionRole {
    Owner,
    Member,
}

impl RegionRole {
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(Self::Owner),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "Owner"),
            Self::Member => write!(f, "Member"),
        }
    }
}

/// A player listed on a local region. Identity is the UUID; the name is for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMember {
    pub uuid: Uuid,
    pub username: String,
    pub role: RegionRole,
}

impl RegionMember {
    #[must_use]
    pub fn new(uuid: Uuid, username: impl Into<String>, role: RegionRole) -> Self {
        Self {
            uuid,
            username: username.into(),
            role,
        }
    }

    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role == RegionRole::Owner
    }
}
