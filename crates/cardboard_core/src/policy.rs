//! Access policy for mutating intents.
//!
//! # Invariants
//! - Only `Role::Admin` may mutate board state.
//! - Reads and filter toggles are never gated.

use crate::error::{BoardError, BoardResult};
use crate::model::member::Role;
use log::warn;

/// Returns whether `role` may change board state.
pub fn can_mutate(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Fails with `BoardError::PermissionDenied` unless `role` may mutate.
pub fn ensure_can_mutate(role: Role, intent: &'static str) -> BoardResult<()> {
    if can_mutate(role) {
        return Ok(());
    }
    warn!("event=access_check module=policy status=denied role={role} intent={intent}");
    Err(BoardError::PermissionDenied { role, intent })
}

#[cfg(test)]
mod tests {
    use super::{can_mutate, ensure_can_mutate};
    use crate::error::BoardError;
    use crate::model::member::Role;

    #[test]
    fn only_admin_can_mutate() {
        assert!(can_mutate(Role::Admin));
        assert!(!can_mutate(Role::Viewer));
    }

    #[test]
    fn viewer_is_denied_with_intent_name() {
        assert_eq!(
            ensure_can_mutate(Role::Viewer, "add_card"),
            Err(BoardError::PermissionDenied {
                role: Role::Viewer,
                intent: "add_card",
            })
        );
        assert!(ensure_can_mutate(Role::Admin, "add_card").is_ok());
    }
}
