//! Named board intents.
//!
//! Every cross-component action reaches the board as one of these values
//! with an explicit payload; nothing reaches into board state directly.

use crate::model::card::{Card, CardId, CardInput, Direction};
use crate::model::column::ColumnId;
use crate::model::member::{Member, MemberId, Role};
use serde::{Deserialize, Serialize};

/// User intent emitted by the render collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardIntent {
    AddCard {
        card: CardInput,
    },
    /// Full intended card state, not a patch.
    UpdateCard {
        card: Card,
    },
    DeleteCard {
        card_id: CardId,
    },
    MoveCard {
        card_id: CardId,
        target_column: ColumnId,
    },
    ReorderWithinColumn {
        card_id: CardId,
        direction: Direction,
    },
    ToggleThemeFilter {
        theme: String,
    },
    CreateTheme {
        name: String,
    },
    AddMember {
        email: String,
        role: Role,
    },
    SetRole {
        member_id: MemberId,
        role: Role,
    },
    RemoveMember {
        member_id: MemberId,
    },
    /// Saved share dialog: the complete new member list.
    ReplaceMembers {
        members: Vec<Member>,
    },
}

impl BoardIntent {
    pub const ADD_CARD: &'static str = "add_card";
    pub const UPDATE_CARD: &'static str = "update_card";
    pub const DELETE_CARD: &'static str = "delete_card";
    pub const MOVE_CARD: &'static str = "move_card";
    pub const REORDER_WITHIN_COLUMN: &'static str = "reorder_within_column";
    pub const TOGGLE_THEME_FILTER: &'static str = "toggle_theme_filter";
    pub const CREATE_THEME: &'static str = "create_theme";
    pub const ADD_MEMBER: &'static str = "add_member";
    pub const SET_ROLE: &'static str = "set_role";
    pub const REMOVE_MEMBER: &'static str = "remove_member";
    pub const REPLACE_MEMBERS: &'static str = "replace_members";

    /// Stable snake_case name used in logs and permission errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddCard { .. } => Self::ADD_CARD,
            Self::UpdateCard { .. } => Self::UPDATE_CARD,
            Self::DeleteCard { .. } => Self::DELETE_CARD,
            Self::MoveCard { .. } => Self::MOVE_CARD,
            Self::ReorderWithinColumn { .. } => Self::REORDER_WITHIN_COLUMN,
            Self::ToggleThemeFilter { .. } => Self::TOGGLE_THEME_FILTER,
            Self::CreateTheme { .. } => Self::CREATE_THEME,
            Self::AddMember { .. } => Self::ADD_MEMBER,
            Self::SetRole { .. } => Self::SET_ROLE,
            Self::RemoveMember { .. } => Self::REMOVE_MEMBER,
            Self::ReplaceMembers { .. } => Self::REPLACE_MEMBERS,
        }
    }

    /// Whether the intent changes board state (and so needs an admin).
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::ToggleThemeFilter { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::BoardIntent;
    use crate::model::card::Direction;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn only_filter_toggle_is_non_mutating() {
        let toggle = BoardIntent::ToggleThemeFilter {
            theme: "layout".to_string(),
        };
        let reorder = BoardIntent::ReorderWithinColumn {
            card_id: Uuid::new_v4(),
            direction: Direction::Up,
        };
        assert!(!toggle.is_mutating());
        assert!(reorder.is_mutating());
        assert_eq!(reorder.name(), "reorder_within_column");
    }

    #[test]
    fn intents_decode_from_tagged_json() {
        let card_id = Uuid::new_v4();
        let intent: BoardIntent = serde_json::from_value(json!({
            "type": "move_card",
            "card_id": card_id,
            "target_column": "ready",
        }))
        .unwrap();
        assert_eq!(
            intent,
            BoardIntent::MoveCard {
                card_id,
                target_column: "ready".into(),
            }
        );
    }
}
