//! Card domain model.
//!
//! # Responsibility
//! - Define the canonical card record and its creation payload.
//! - Own field-level validation that needs no registry context.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `rating` is a `Rating`, so out-of-range values cannot be stored.
//! - `problem` is non-blank for every stored card.

use crate::error::ValidationError;
use crate::model::column::ColumnId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to a card when it is added to the board.
pub type CardId = Uuid;

/// Problem severity rating, 1 (minor) through 5 (critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Builds a rating, rejecting anything outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Five-slot star strip, filled stars first.
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        i64::from(value.0)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction for intra-column reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Canonical card record.
///
/// Serialized with camelCase keys so the render collaborator sees the same
/// field names it emits (`docLink`, `createdAt`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    /// Short statement of the problem. Required.
    pub problem: String,
    pub description: Option<String>,
    /// Link to a supporting document or prototype.
    pub doc_link: Option<String>,
    pub column: ColumnId,
    /// Theme label; canonical casing from the theme registry.
    pub theme: String,
    pub rating: Rating,
    pub created_at: i64,
    /// Refreshed on every field mutation, including column moves.
    pub updated_at: i64,
}

impl Card {
    /// Materializes a new card from creation input.
    ///
    /// Does not validate; the card repository validates before insertion.
    pub fn from_input(id: CardId, input: CardInput, now_ms: i64) -> Self {
        Self {
            id,
            problem: input.problem,
            description: input.description,
            doc_link: input.doc_link,
            column: input.column,
            theme: input.theme,
            rating: input.rating,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Returns whether two cards carry the same user-editable content.
    ///
    /// Ignores `updated_at`, which changes on every write.
    pub fn same_content(&self, other: &Card) -> bool {
        self.id == other.id
            && self.problem == other.problem
            && self.description == other.description
            && self.doc_link == other.doc_link
            && self.column == other.column
            && self.theme == other.theme
            && self.rating == other.rating
            && self.created_at == other.created_at
    }
}

/// Creation payload for a card; the board assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub problem: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub doc_link: Option<String>,
    pub column: ColumnId,
    pub theme: String,
    #[serde(default)]
    pub rating: Rating,
}

impl CardInput {
    pub fn new(
        problem: impl Into<String>,
        column: impl Into<ColumnId>,
        theme: impl Into<String>,
        rating: Rating,
    ) -> Self {
        Self {
            problem: problem.into(),
            description: None,
            doc_link: None,
            column: column.into(),
            theme: theme.into(),
            rating,
        }
    }
}

/// Rejects blank problem statements.
pub fn validate_problem(problem: &str) -> Result<(), ValidationError> {
    if problem.trim().is_empty() {
        return Err(ValidationError::EmptyProblem);
    }
    Ok(())
}

/// Collapses blank optional text to `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
