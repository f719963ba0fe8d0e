//! Board use-case layer.
//!
//! # Responsibility
//! - Turn named intents into repository and registry calls behind the
//!   access policy.
//! - Hand immutable snapshots to the render collaborator and keep it
//!   decoupled from storage details.

pub mod board_coordinator;
pub mod draft;
pub mod intent;
pub mod snapshot;
