//! Theme filter engine.
//!
//! # Invariants
//! - `visible_cards` is pure: it never mutates and is recomputed per read.
//! - An empty filter set shows every card.
//! - Output preserves the global card order.

use crate::model::card::Card;
use serde::Serialize;

/// Returns the cards whose theme is in `active_filters`, in board order.
///
/// Theme comparison ignores case and surrounding whitespace.
pub fn visible_cards<'a, S: AsRef<str>>(
    all_cards: &'a [Card],
    active_filters: &[S],
) -> Vec<&'a Card> {
    if active_filters.is_empty() {
        return all_cards.iter().collect();
    }

    let keys: Vec<String> = active_filters
        .iter()
        .map(|filter| filter_key(filter.as_ref()))
        .collect();
    all_cards
        .iter()
        .filter(|card| keys.contains(&filter_key(&card.theme)))
        .collect()
}

/// Ordered set of active theme filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThemeFilter {
    active: Vec<String>,
}

impl ThemeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a theme on or off. Returns `true` when the theme is now active.
    pub fn toggle(&mut self, theme: &str) -> bool {
        let key = filter_key(theme);
        if let Some(index) = self
            .active
            .iter()
            .position(|active| filter_key(active) == key)
        {
            self.active.remove(index);
            false
        } else {
            self.active.push(theme.trim().to_string());
            true
        }
    }

    pub fn is_active(&self, theme: &str) -> bool {
        let key = filter_key(theme);
        self.active.iter().any(|active| filter_key(active) == key)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Active themes in the order they were switched on.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Applies this filter to a card sequence.
    pub fn apply<'a>(&self, all_cards: &'a [Card]) -> Vec<&'a Card> {
        visible_cards(all_cards, &self.active)
    }
}

fn filter_key(theme: &str) -> String {
    theme.trim().to_lowercase()
}
