//! Local drafts for the add/edit card form and the share dialog.
//!
//! # Invariants
//! - A draft never touches board state. Submitting turns it into an
//!   intent; cancelling drops it.
//! - Both `submit` and `cancel` consume the draft, returning the caller
//!   to idle.

use crate::error::ValidationError;
use crate::model::card::{validate_problem, Card, CardInput, Rating};
use crate::model::column::ColumnId;
use crate::model::member::{Member, MemberId, Role};
use crate::registry::membership_registry::MembershipRegistry;
use crate::service::intent::BoardIntent;

/// In-progress card form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    editing: Option<Card>,
    pub problem: String,
    pub description: Option<String>,
    pub doc_link: Option<String>,
    pub column: ColumnId,
    pub theme: String,
    pub rating: Rating,
}

impl CardDraft {
    /// Starts a blank draft for a new card in `column`.
    pub fn for_new(column: impl Into<ColumnId>, theme: impl Into<String>) -> Self {
        Self {
            editing: None,
            problem: String::new(),
            description: None,
            doc_link: None,
            column: column.into(),
            theme: theme.into(),
            rating: Rating::default(),
        }
    }

    /// Starts a draft pre-filled from an existing card.
    pub fn for_edit(card: &Card) -> Self {
        Self {
            editing: Some(card.clone()),
            problem: card.problem.clone(),
            description: card.description.clone(),
            doc_link: card.doc_link.clone(),
            column: card.column.clone(),
            theme: card.theme.clone(),
            rating: card.rating,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn with_problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = problem.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_doc_link(mut self, doc_link: impl Into<String>) -> Self {
        self.doc_link = Some(doc_link.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    /// Form-level check run before offering submit.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_problem(&self.problem)
    }

    /// Commits the draft into an `AddCard` or full-state `UpdateCard`.
    pub fn submit(self) -> BoardIntent {
        match self.editing {
            Some(original) => BoardIntent::UpdateCard {
                card: Card {
                    problem: self.problem,
                    description: self.description,
                    doc_link: self.doc_link,
                    column: self.column,
                    theme: self.theme,
                    rating: self.rating,
                    ..original
                },
            },
            None => BoardIntent::AddCard {
                card: CardInput {
                    problem: self.problem,
                    description: self.description,
                    doc_link: self.doc_link,
                    column: self.column,
                    theme: self.theme,
                    rating: self.rating,
                },
            },
        }
    }

    /// Abandons the draft.
    pub fn cancel(self) {}
}

/// In-progress share dialog: a private copy of the member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipDraft {
    draft: MembershipRegistry,
}

impl MembershipDraft {
    pub fn begin(current: &[Member]) -> Self {
        Self {
            draft: MembershipRegistry::from_members(current.to_vec()),
        }
    }

    /// Adds a member locally. Blank or duplicate e-mails are ignored.
    pub fn add(&mut self, email: &str, role: Role) -> bool {
        matches!(self.draft.add_member(email, role), Ok(addition) if addition.is_added())
    }

    pub fn set_role(&mut self, id: MemberId, role: Role) -> bool {
        self.draft.set_role(id, role).is_ok()
    }

    pub fn remove(&mut self, id: MemberId) -> bool {
        self.draft.remove_member(id).is_ok()
    }

    pub fn members(&self) -> &[Member] {
        self.draft.members()
    }

    /// Saves the dialog as a `ReplaceMembers` intent.
    pub fn submit(self) -> BoardIntent {
        BoardIntent::ReplaceMembers {
            members: self.draft.members().to_vec(),
        }
    }

    pub fn cancel(self) {}
}
