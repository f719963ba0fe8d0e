//! Core state engine for a single card board.
//! This crate is the single source of truth for board invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod policy;
pub mod registry;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BoardConfig, ConfigError, SeedMember};
pub use error::{BoardError, BoardResult, ValidationError};
pub use filter::{visible_cards, ThemeFilter};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::card::{Card, CardId, CardInput, Direction, Rating};
pub use model::column::{Column, ColumnId};
pub use model::member::{Member, MemberId, Role};
pub use model::theme::{theme_color, theme_label};
pub use policy::{can_mutate, ensure_can_mutate};
pub use registry::membership_registry::{MemberAddition, MembershipRegistry};
pub use registry::theme_registry::{ThemeRegistration, ThemeRegistry};
pub use repo::card_repo::{CardRepository, ReorderOutcome};
pub use service::board_coordinator::{Actor, BoardCoordinator};
pub use service::draft::{CardDraft, MembershipDraft};
pub use service::intent::BoardIntent;
pub use service::snapshot::{BoardSnapshot, ColumnView, ThemeView};
pub use store::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};

/// Minimal health-check API for embedding hosts.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
