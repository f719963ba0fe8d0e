//! Board configuration.
//!
//! # Responsibility
//! - Describe the static board setup: columns, starting themes, seed
//!   members, optional seed cards and the membership persistence key.
//! - Load that setup from JSON and reject unusable configurations.
//!
//! # Invariants
//! - A validated config has at least one column, and column ids are
//!   non-blank and unique.
//! - Columns are fixed for the lifetime of a board built from the config.

use crate::error::BoardError;
use crate::model::card::{CardInput, Rating};
use crate::model::column::Column;
use crate::model::member::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Persistence key used for the membership list unless configured.
pub const DEFAULT_MEMBERSHIP_KEY: &str = "cardboard.members";

const DEFAULT_TITLE: &str = "Q4 AI Design Kanban";
const DEFAULT_COLUMNS: &[(&str, &str)] = &[
    ("problems", "Problems"),
    ("on-deck", "On Deck"),
    ("feedback-needed", "Feedback Needed"),
    ("ready", "Ready"),
];
const DEFAULT_THEMES: &[&str] = &[
    "onboarding",
    "integrations",
    "library",
    "pricing",
    "ai-input",
    "layout",
];
const DEFAULT_OWNER_EMAIL: &str = "you@example.com";

/// Member seeded when the store holds no membership list yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMember {
    pub email: String,
    pub role: Role,
}

/// Static board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub title: String,
    pub columns: Vec<Column>,
    pub themes: Vec<String>,
    pub membership_key: String,
    pub default_members: Vec<SeedMember>,
    /// Cards placed on the board when it opens, in board order.
    pub seed_cards: Vec<CardInput>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            columns: DEFAULT_COLUMNS
                .iter()
                .map(|(id, title)| Column::new(*id, *title))
                .collect(),
            themes: DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect(),
            membership_key: DEFAULT_MEMBERSHIP_KEY.to_string(),
            default_members: vec![SeedMember {
                email: DEFAULT_OWNER_EMAIL.to_string(),
                role: Role::Admin,
            }],
            seed_cards: Vec::new(),
        }
    }
}

impl BoardConfig {
    /// Adds the two demo cards the board ships with in its sample setup.
    pub fn with_sample_cards(mut self) -> Self {
        let samples = [
            (
                "Users can't find the login button",
                "Primary action is hidden in overflow menu on desktop.",
                "https://figma.com/example",
                "problems",
                "layout",
                4,
            ),
            (
                "Onboarding flow is too long",
                "Reduce steps; users drop at step 3 of 5.",
                "https://megan-situationbear.github.io/Mego-Proto-Experiments/",
                "on-deck",
                "onboarding",
                3,
            ),
        ];
        for (problem, description, link, column, theme, stars) in samples {
            self.seed_cards.push(CardInput {
                problem: problem.to_string(),
                description: Some(description.to_string()),
                doc_link: Some(link.to_string()),
                column: column.into(),
                theme: theme.to_string(),
                rating: Rating::new(stars).unwrap_or_default(),
            });
        }
        self
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&text)
    }

    /// Checks the structural rules a board relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            let id = column.id.as_str();
            if id.trim().is_empty() {
                return Err(ConfigError::BlankColumnId);
            }
            if column.title.trim().is_empty() {
                return Err(ConfigError::BlankColumnTitle(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateColumnId(id.to_string()));
            }
        }

        if self.themes.iter().any(|theme| theme.trim().is_empty()) {
            return Err(ConfigError::BlankTheme);
        }

        if self
            .default_members
            .iter()
            .any(|member| member.email.trim().is_empty())
        {
            return Err(ConfigError::BlankSeedEmail);
        }

        if self.membership_key.trim().is_empty() {
            return Err(ConfigError::BlankMembershipKey);
        }

        Ok(())
    }
}

/// Configuration load/validation failures.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NoColumns,
    BlankColumnId,
    BlankColumnTitle(String),
    DuplicateColumnId(String),
    BlankTheme,
    BlankSeedEmail,
    BlankMembershipKey,
    /// A seed card failed board validation; `index` is its list position.
    InvalidSeedCard { index: usize, source: BoardError },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read board config: {err}"),
            Self::Parse(err) => write!(f, "invalid board config: {err}"),
            Self::NoColumns => write!(f, "board config must declare at least one column"),
            Self::BlankColumnId => write!(f, "column id must not be blank"),
            Self::BlankColumnTitle(id) => write!(f, "column `{id}` has a blank title"),
            Self::DuplicateColumnId(id) => write!(f, "duplicate column id: `{id}`"),
            Self::BlankTheme => write!(f, "theme names must not be blank"),
            Self::BlankSeedEmail => write!(f, "default member email must not be blank"),
            Self::BlankMembershipKey => write!(f, "membership key must not be blank"),
            Self::InvalidSeedCard { index, source } => {
                write!(f, "seed card #{index} is invalid: {source}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidSeedCard { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardConfig, ConfigError, DEFAULT_MEMBERSHIP_KEY};
    use crate::model::member::Role;

    #[test]
    fn default_config_matches_reference_board() {
        let config = BoardConfig::default();
        let ids: Vec<&str> = config.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["problems", "on-deck", "feedback-needed", "ready"]);
        assert_eq!(config.themes.len(), 6);
        assert_eq!(config.membership_key, DEFAULT_MEMBERSHIP_KEY);
        assert_eq!(config.default_members[0].role, Role::Admin);
        assert!(config.seed_cards.is_empty());
        config.validate().expect("default config is valid");
    }

    #[test]
    fn sample_cards_use_configured_columns_and_themes() {
        let config = BoardConfig::default().with_sample_cards();
        assert_eq!(config.seed_cards.len(), 2);

        let first = &config.seed_cards[0];
        assert_eq!(first.column.as_str(), "problems");
        assert_eq!(first.theme, "layout");
        assert_eq!(first.rating.get(), 4);
        assert!(config.themes.contains(&config.seed_cards[1].theme));
    }

    #[test]
    fn seed_cards_load_from_json() {
        let config = BoardConfig::from_json_str(
            r#"{"seed_cards": [{"problem": "Slow", "column": "ready", "theme": "layout"}]}"#,
        )
        .unwrap();
        assert_eq!(config.seed_cards.len(), 1);
        assert_eq!(config.seed_cards[0].rating.get(), 3);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = BoardConfig::from_json_str(
            r#"{"columns": [{"id": "todo", "title": "To Do"}], "themes": ["infra"]}"#,
        )
        .unwrap();
        assert_eq!(config.columns.len(), 1);
        assert_eq!(config.themes, ["infra"]);
        assert_eq!(config.membership_key, DEFAULT_MEMBERSHIP_KEY);
    }

    #[test]
    fn rejects_duplicate_and_missing_columns() {
        let err = BoardConfig::from_json_str(
            r#"{"columns": [{"id": "a", "title": "A"}, {"id": "a", "title": "Again"}]}"#,
        )
        .expect_err("duplicate ids must fail");
        assert!(matches!(err, ConfigError::DuplicateColumnId(id) if id == "a"));

        let err = BoardConfig::from_json_str(r#"{"columns": []}"#).expect_err("empty must fail");
        assert!(matches!(err, ConfigError::NoColumns));

        let err = BoardConfig::from_json_str(r#"{"themes": ["ok", " "]}"#)
            .expect_err("blank theme must fail");
        assert!(matches!(err, ConfigError::BlankTheme));
    }

    #[test]
    fn reads_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, r#"{"title": "Infra board"}"#).unwrap();

        let config = BoardConfig::from_json_file(&path).unwrap();
        assert_eq!(config.title, "Infra board");

        let err = BoardConfig::from_json_file(dir.path().join("missing.json"))
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
