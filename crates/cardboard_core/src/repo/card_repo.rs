//! In-memory card repository.
//!
//! # Responsibility
//! - Provide create/read/update/delete, move and reorder over the card
//!   sequence.
//!
//! # Invariants
//! - Card ids are unique and never reassigned.
//! - Every stored card references a configured column and a non-blank
//!   problem.
//! - `updated_at` strictly increases on every field mutation; reorder
//!   touches no field.
//! - Every method validates before mutating.

use crate::clock::next_stamp;
use crate::error::{BoardError, BoardResult, ValidationError};
use crate::model::card::{normalize_optional, validate_problem, Card, CardId, Direction};
use crate::model::column::{is_configured_column, Column, ColumnId};
use crate::registry::theme_registry::ThemeRegistry;

/// Result of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Swapped sequence positions with the named neighbour.
    Swapped { with: CardId },
    /// Already first/last in its column; nothing changed.
    Unchanged,
}

/// Ordered card store bound to a fixed column configuration.
#[derive(Debug, Clone)]
pub struct CardRepository {
    columns: Vec<Column>,
    cards: Vec<Card>,
}

impl CardRepository {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            cards: Vec::new(),
        }
    }

    /// Appends a card to the end of the sequence.
    ///
    /// Sets `created_at = updated_at = now_ms` and stores the theme with the
    /// registry's canonical spelling.
    ///
    /// # Errors
    /// - `ValidationError` for a blank problem, unknown theme, unknown column
    ///   or duplicate id.
    pub fn add_card(
        &mut self,
        card: Card,
        themes: &ThemeRegistry,
        now_ms: i64,
    ) -> BoardResult<&Card> {
        if self.index_of(card.id).is_some() {
            return Err(ValidationError::DuplicateCardId(card.id).into());
        }
        let theme = self.validate_fields(&card, themes)?;

        self.cards.push(Card {
            theme,
            description: normalize_optional(card.description),
            doc_link: normalize_optional(card.doc_link),
            created_at: now_ms,
            updated_at: now_ms,
            ..card
        });
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Replaces every field except `id` and `created_at`.
    ///
    /// Callers pass the full intended state; this is not a partial patch.
    ///
    /// # Errors
    /// - `BoardError::CardNotFound` when no card has `card.id`.
    /// - `ValidationError` for a blank problem, unknown theme or column.
    pub fn update_card(
        &mut self,
        card: Card,
        themes: &ThemeRegistry,
        now_ms: i64,
    ) -> BoardResult<&Card> {
        let index = self
            .index_of(card.id)
            .ok_or(BoardError::CardNotFound(card.id))?;
        let theme = self.validate_fields(&card, themes)?;

        let existing = &mut self.cards[index];
        existing.problem = card.problem;
        existing.description = normalize_optional(card.description);
        existing.doc_link = normalize_optional(card.doc_link);
        existing.column = card.column;
        existing.theme = theme;
        existing.rating = card.rating;
        existing.updated_at = next_stamp(now_ms, existing.updated_at);
        Ok(&*existing)
    }

    /// Removes a card. Deleting an absent id is an error, not a no-op.
    pub fn delete_card(&mut self, id: CardId) -> BoardResult<Card> {
        let index = self.index_of(id).ok_or(BoardError::CardNotFound(id))?;
        Ok(self.cards.remove(index))
    }

    /// Changes a card's column without moving it in the sequence.
    ///
    /// The card lands wherever its existing sequence position places it
    /// among the target column's cards; it is not appended to the end.
    pub fn move_card(&mut self, id: CardId, column: ColumnId, now_ms: i64) -> BoardResult<&Card> {
        let index = self.index_of(id).ok_or(BoardError::CardNotFound(id))?;
        if !is_configured_column(&self.columns, &column) {
            return Err(ValidationError::UnknownColumn(column.to_string()).into());
        }

        let card = &mut self.cards[index];
        card.column = column;
        card.updated_at = next_stamp(now_ms, card.updated_at);
        Ok(&*card)
    }

    /// Swaps a card with its nearest same-column neighbour in `direction`.
    ///
    /// No field of either card changes, `updated_at` included.
    pub fn reorder_within_column(
        &mut self,
        id: CardId,
        direction: Direction,
    ) -> BoardResult<ReorderOutcome> {
        let index = self.index_of(id).ok_or(BoardError::CardNotFound(id))?;
        let column = &self.cards[index].column;

        let neighbour = match direction {
            Direction::Up => self.cards[..index]
                .iter()
                .rposition(|card| &card.column == column),
            Direction::Down => self.cards[index + 1..]
                .iter()
                .position(|card| &card.column == column)
                .map(|offset| index + 1 + offset),
        };

        match neighbour {
            Some(other) => {
                let with = self.cards[other].id;
                self.cards.swap(index, other);
                Ok(ReorderOutcome::Swapped { with })
            }
            None => Ok(ReorderOutcome::Unchanged),
        }
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Full sequence in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of one column in board order.
    pub fn column_cards<'a>(&'a self, column: &'a ColumnId) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |card| &card.column == column)
    }

    /// Zero-based position of a card among its column's cards.
    pub fn position_in_column(&self, id: CardId) -> Option<usize> {
        let card = self.get(id)?;
        self.column_cards(&card.column)
            .position(|candidate| candidate.id == id)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    /// Validates card content and returns the canonical theme label.
    fn validate_fields(
        &self,
        card: &Card,
        themes: &ThemeRegistry,
    ) -> Result<String, ValidationError> {
        validate_problem(&card.problem)?;
        let theme = themes
            .canonical(&card.theme)
            .ok_or_else(|| ValidationError::UnknownTheme(card.theme.clone()))?;
        if !is_configured_column(&self.columns, &card.column) {
            return Err(ValidationError::UnknownColumn(card.column.to_string()));
        }
        Ok(theme.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{CardRepository, ReorderOutcome};
    use crate::error::{BoardError, ValidationError};
    use crate::model::card::{Card, CardInput, Direction, Rating};
    use crate::model::column::{Column, ColumnId};
    use crate::registry::theme_registry::ThemeRegistry;
    use uuid::Uuid;

    fn columns() -> Vec<Column> {
        vec![Column::new("todo", "To Do"), Column::new("done", "Done")]
    }

    fn themes() -> ThemeRegistry {
        ThemeRegistry::with_themes(["layout", "pricing"]).unwrap()
    }

    fn card(problem: &str, column: &str) -> Card {
        let input = CardInput::new(problem, column, "layout", Rating::new(2).unwrap());
        Card::from_input(Uuid::new_v4(), input, 0)
    }

    fn ids(repo: &CardRepository) -> Vec<Uuid> {
        repo.cards().iter().map(|card| card.id).collect()
    }

    #[test]
    fn add_appends_and_stamps_both_timestamps() {
        let mut repo = CardRepository::new(columns());
        let first = card("one", "todo");
        let second = card("two", "done");
        repo.add_card(first.clone(), &themes(), 100).unwrap();
        let stored = repo.add_card(second.clone(), &themes(), 200).unwrap();

        assert_eq!(stored.created_at, 200);
        assert_eq!(stored.updated_at, 200);
        assert_eq!(ids(&repo), vec![first.id, second.id]);
    }

    #[test]
    fn add_canonicalizes_theme_and_rejects_unknown_references() {
        let mut repo = CardRepository::new(columns());
        let mut shouting = card("one", "todo");
        shouting.theme = "LAYOUT".to_string();
        let stored = repo.add_card(shouting, &themes(), 1).unwrap();
        assert_eq!(stored.theme, "layout");

        let mut unknown_theme = card("two", "todo");
        unknown_theme.theme = "billing".to_string();
        assert_eq!(
            repo.add_card(unknown_theme, &themes(), 1).unwrap_err(),
            BoardError::Validation(ValidationError::UnknownTheme("billing".to_string()))
        );

        let unknown_column = card("three", "archive");
        assert_eq!(
            repo.add_card(unknown_column, &themes(), 1).unwrap_err(),
            BoardError::Validation(ValidationError::UnknownColumn("archive".to_string()))
        );
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn add_rejects_blank_problem_and_duplicate_id() {
        let mut repo = CardRepository::new(columns());
        let err = repo.add_card(card("   ", "todo"), &themes(), 1).unwrap_err();
        assert_eq!(err, BoardError::Validation(ValidationError::EmptyProblem));

        let existing = card("one", "todo");
        repo.add_card(existing.clone(), &themes(), 1).unwrap();
        let err = repo.add_card(existing.clone(), &themes(), 2).unwrap_err();
        assert_eq!(
            err,
            BoardError::Validation(ValidationError::DuplicateCardId(existing.id))
        );
    }

    #[test]
    fn update_keeps_id_and_created_at_and_refreshes_updated_at() {
        let mut repo = CardRepository::new(columns());
        let original = card("one", "todo");
        repo.add_card(original.clone(), &themes(), 10).unwrap();

        let mut edited = repo.get(original.id).unwrap().clone();
        edited.problem = "one, reworded".to_string();
        edited.theme = "pricing".to_string();
        edited.created_at = 999;
        edited.doc_link = Some("  ".to_string());
        let stored = repo.update_card(edited, &themes(), 20).unwrap();

        assert_eq!(stored.problem, "one, reworded");
        assert_eq!(stored.theme, "pricing");
        assert_eq!(stored.created_at, 10);
        assert_eq!(stored.updated_at, 20);
        assert_eq!(stored.doc_link, None);
    }

    #[test]
    fn update_missing_card_is_not_found() {
        let mut repo = CardRepository::new(columns());
        let ghost = card("ghost", "todo");
        assert_eq!(
            repo.update_card(ghost.clone(), &themes(), 1).unwrap_err(),
            BoardError::CardNotFound(ghost.id)
        );
    }

    #[test]
    fn delete_twice_is_an_error() {
        let mut repo = CardRepository::new(columns());
        let target = card("one", "todo");
        repo.add_card(target.clone(), &themes(), 1).unwrap();

        repo.delete_card(target.id).unwrap();
        assert_eq!(
            repo.delete_card(target.id).unwrap_err(),
            BoardError::CardNotFound(target.id)
        );
        assert!(repo.is_empty());
    }

    #[test]
    fn move_keeps_sequence_position_and_bumps_updated_at() {
        let mut repo = CardRepository::new(columns());
        let a = card("a", "todo");
        let b = card("b", "done");
        let c = card("c", "todo");
        for next in [&a, &b, &c] {
            repo.add_card(next.clone(), &themes(), 50).unwrap();
        }

        let moved = repo.move_card(a.id, ColumnId::from("done"), 50).unwrap();
        assert_eq!(moved.column.as_str(), "done");
        assert_eq!(moved.updated_at, 51);

        assert_eq!(ids(&repo), vec![a.id, b.id, c.id]);
        // `a` precedes `b` in the sequence, so it leads the done column.
        assert_eq!(repo.position_in_column(a.id), Some(0));
        assert_eq!(repo.position_in_column(b.id), Some(1));
    }

    #[test]
    fn move_checks_card_before_column() {
        let mut repo = CardRepository::new(columns());
        let ghost = Uuid::new_v4();
        assert_eq!(
            repo.move_card(ghost, ColumnId::from("nowhere"), 1).unwrap_err(),
            BoardError::CardNotFound(ghost)
        );

        let a = card("a", "todo");
        repo.add_card(a.clone(), &themes(), 1).unwrap();
        assert!(repo
            .move_card(a.id, ColumnId::from("nowhere"), 2)
            .unwrap_err()
            .is_validation());
        assert_eq!(repo.get(a.id).unwrap().column.as_str(), "todo");
        assert_eq!(repo.get(a.id).unwrap().updated_at, 1);
    }

    #[test]
    fn reorder_skips_other_columns_and_swaps_sequence_slots() {
        let mut repo = CardRepository::new(columns());
        let a = card("a", "todo");
        let x = card("x", "done");
        let b = card("b", "todo");
        for next in [&a, &x, &b] {
            repo.add_card(next.clone(), &themes(), 5).unwrap();
        }

        let outcome = repo.reorder_within_column(b.id, Direction::Up).unwrap();
        assert_eq!(outcome, ReorderOutcome::Swapped { with: a.id });
        assert_eq!(ids(&repo), vec![b.id, x.id, a.id]);
        assert_eq!(repo.get(a.id).unwrap().updated_at, 5);
        assert_eq!(repo.get(b.id).unwrap().updated_at, 5);
    }

    #[test]
    fn reorder_at_column_edge_is_noop() {
        let mut repo = CardRepository::new(columns());
        let a = card("a", "todo");
        let b = card("b", "todo");
        repo.add_card(a.clone(), &themes(), 1).unwrap();
        repo.add_card(b.clone(), &themes(), 1).unwrap();

        assert_eq!(
            repo.reorder_within_column(a.id, Direction::Up).unwrap(),
            ReorderOutcome::Unchanged
        );
        assert_eq!(
            repo.reorder_within_column(b.id, Direction::Down).unwrap(),
            ReorderOutcome::Unchanged
        );
        assert_eq!(ids(&repo), vec![a.id, b.id]);
    }

    #[test]
    fn reorder_missing_card_is_not_found() {
        let mut repo = CardRepository::new(columns());
        let ghost = Uuid::new_v4();
        assert_eq!(
            repo.reorder_within_column(ghost, Direction::Down),
            Err(BoardError::CardNotFound(ghost))
        );
    }
}
