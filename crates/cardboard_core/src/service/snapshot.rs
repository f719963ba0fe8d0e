//! Immutable board snapshots handed to the render collaborator.

use crate::filter::ThemeFilter;
use crate::model::card::{Card, CardId};
use crate::model::column::ColumnId;
use crate::model::member::{Member, Role};
use crate::model::theme::{theme_color, theme_label};
use crate::policy::can_mutate;
use crate::registry::theme_registry::ThemeRegistry;
use crate::repo::card_repo::CardRepository;
use serde::Serialize;

/// Point-in-time view of the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub title: String,
    /// Visible cards in global board order.
    pub cards: Vec<Card>,
    /// Visible cards grouped by configured column, in column order.
    pub columns: Vec<ColumnView>,
    pub themes: Vec<ThemeView>,
    pub active_filters: Vec<String>,
    pub members: Vec<Member>,
    /// Effective role of the acting identity.
    pub role: Role,
    pub can_edit: bool,
    /// Cards on the board, ignoring filters.
    pub total_cards: usize,
}

impl BoardSnapshot {
    pub fn column(&self, id: &str) -> Option<&ColumnView> {
        self.columns.iter().find(|column| column.id.as_str() == id)
    }

    pub fn visible_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }
}

/// One column with its visible cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
    pub count: usize,
}

impl ColumnView {
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }
}

/// Theme with its presentation attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeView {
    pub name: String,
    pub label: String,
    pub color: String,
    pub active: bool,
}

pub(crate) struct SnapshotParts<'a> {
    pub title: &'a str,
    pub cards: &'a CardRepository,
    pub themes: &'a ThemeRegistry,
    pub filter: &'a ThemeFilter,
    pub members: &'a [Member],
    pub role: Role,
}

pub(crate) fn capture(parts: SnapshotParts<'_>) -> BoardSnapshot {
    let visible: Vec<Card> = parts
        .filter
        .apply(parts.cards.cards())
        .into_iter()
        .cloned()
        .collect();

    let columns = parts
        .cards
        .columns()
        .iter()
        .map(|column| {
            let cards: Vec<Card> = visible
                .iter()
                .filter(|card| card.column == column.id)
                .cloned()
                .collect();
            ColumnView {
                id: column.id.clone(),
                title: column.title.clone(),
                count: cards.len(),
                cards,
            }
        })
        .collect();

    let themes = parts
        .themes
        .themes()
        .iter()
        .map(|name| ThemeView {
            name: name.clone(),
            label: theme_label(name),
            color: theme_color(name).to_string(),
            active: parts.filter.is_active(name),
        })
        .collect();

    BoardSnapshot {
        title: parts.title.to_string(),
        cards: visible,
        columns,
        themes,
        active_filters: parts.filter.active().to_vec(),
        members: parts.members.to_vec(),
        role: parts.role,
        can_edit: can_mutate(parts.role),
        total_cards: parts.cards.len(),
    }
}
