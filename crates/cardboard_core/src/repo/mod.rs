//! Card storage.
//!
//! # Responsibility
//! - Own the single flat, ordered card sequence.
//! - Enforce card-level invariants before any mutation.
//!
//! # Invariants
//! - "Position within a column" is the relative order of cards sharing a
//!   column value inside the flat sequence. There are no per-column lists.
//! - Moving a card changes its column only; reordering swaps sequence
//!   positions only.

pub mod card_repo;
