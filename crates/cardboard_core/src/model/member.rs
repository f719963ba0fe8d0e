//! Board membership model.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a board member.
pub type MemberId = Uuid;

/// Board role. Only admins may mutate board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person with access to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Unique within the board, compared case-insensitively.
    pub email: String,
    pub role: Role,
}

impl Member {
    /// Creates a member with a freshly generated id.
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            role,
        }
    }

    /// Case-insensitive e-mail comparison.
    pub fn has_email(&self, email: &str) -> bool {
        email_key(&self.email) == email_key(email)
    }
}

/// Normalized lookup key for e-mail deduplication.
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
