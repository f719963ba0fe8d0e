//! Board domain model.
//!
//! # Responsibility
//! - Define the records owned by the board engine: cards, columns, members.
//! - Keep constructors that make invalid values unrepresentable where cheap
//!   (`Rating`), and leave cross-entity checks to the repositories.
//!
//! # Invariants
//! - Card and member ids are stable for the lifetime of the record.
//! - `Rating` values are always within `1..=5`.
//! - Timestamps are Unix epoch milliseconds.

pub mod card;
pub mod column;
pub mod member;
pub mod theme;
