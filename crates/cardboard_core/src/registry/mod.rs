//! In-memory registries for board-level labels and people.
//!
//! # Responsibility
//! - Own the known theme labels (append-only, case-insensitive unique).
//! - Own the membership list (deduplicated by case-insensitive e-mail).
//!
//! # Invariants
//! - Registries validate fully before mutating; a rejected call leaves
//!   them unchanged.
//! - Insertion order is preserved for display.

pub mod membership_registry;
pub mod theme_registry;
