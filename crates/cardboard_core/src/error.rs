//! Board engine error taxonomy.
//!
//! # Responsibility
//! - Classify every failure a board intent can surface to its caller.
//!
//! # Invariants
//! - Errors are returned before any state is mutated; a failed intent
//!   leaves the board exactly as it was.
//! - Persistence failures never appear here: membership writes are
//!   best-effort and only logged.

use crate::model::card::CardId;
use crate::model::member::{MemberId, Role};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Malformed input or a reference to an unknown theme/column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Card problem statement is empty or whitespace-only.
    EmptyProblem,
    /// Theme is not registered on the board.
    UnknownTheme(String),
    /// Column id is not part of the board configuration.
    UnknownColumn(String),
    /// Theme name is empty after trimming.
    EmptyThemeName,
    /// Member e-mail is empty after trimming.
    EmptyEmail,
    /// Rating outside `1..=5`.
    InvalidRating(i64),
    /// A card with this id is already on the board.
    DuplicateCardId(CardId),
    /// A member list carries the same id twice.
    DuplicateMemberId(MemberId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProblem => write!(f, "card problem must not be blank"),
            Self::UnknownTheme(theme) => write!(f, "unknown theme: `{theme}`"),
            Self::UnknownColumn(column) => write!(f, "unknown column: `{column}`"),
            Self::EmptyThemeName => write!(f, "theme name must not be blank"),
            Self::EmptyEmail => write!(f, "member email must not be blank"),
            Self::InvalidRating(value) => {
                write!(f, "rating must be between 1 and 5, got {value}")
            }
            Self::DuplicateCardId(id) => write!(f, "card id already exists: {id}"),
            Self::DuplicateMemberId(id) => write!(f, "member id appears twice: {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Error returned by board intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Validation(ValidationError),
    CardNotFound(CardId),
    MemberNotFound(MemberId),
    /// Acting role may not perform the named intent.
    PermissionDenied { role: Role, intent: &'static str },
}

impl BoardError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CardNotFound(_) | Self::MemberNotFound(_))
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::CardNotFound(_) | Self::MemberNotFound(_) => "not_found",
            Self::PermissionDenied { .. } => "permission",
        }
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CardNotFound(id) => write!(f, "card not found: {id}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::PermissionDenied { role, intent } => {
                write!(f, "role `{role}` may not perform `{intent}`")
            }
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardError, ValidationError};
    use crate::model::member::Role;
    use uuid::Uuid;

    #[test]
    fn classifies_error_kinds() {
        let validation: BoardError = ValidationError::EmptyProblem.into();
        assert!(validation.is_validation());
        assert_eq!(validation.code(), "validation");

        let missing = BoardError::CardNotFound(Uuid::new_v4());
        assert!(missing.is_not_found());
        assert!(BoardError::MemberNotFound(Uuid::new_v4()).is_not_found());

        let denied = BoardError::PermissionDenied {
            role: Role::Viewer,
            intent: "delete_card",
        };
        assert!(denied.is_permission());
        assert_eq!(denied.to_string(), "role `viewer` may not perform `delete_card`");
    }
}
