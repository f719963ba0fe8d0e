//! Theme registry.
//!
//! # Invariants
//! - Labels are unique case-insensitively; the first spelling registered
//!   is the canonical one.
//! - Labels are never removed or renamed within a session.

use crate::error::ValidationError;

/// Outcome of a theme registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeRegistration {
    /// New label appended; carries the stored spelling.
    Added(String),
    /// A case-insensitive match already existed; carries its spelling.
    Existing(String),
}

impl ThemeRegistration {
    /// Canonical label regardless of outcome.
    pub fn label(&self) -> &str {
        match self {
            Self::Added(label) | Self::Existing(label) => label,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Append-only ordered set of theme labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeRegistry {
    labels: Vec<String>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from initial labels, applying registration rules
    /// to each (so duplicates collapse and blanks are rejected).
    pub fn with_themes<I, S>(themes: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for theme in themes {
            registry.register_theme(theme.as_ref())?;
        }
        Ok(registry)
    }

    /// Registers a label after trimming.
    ///
    /// # Errors
    /// - `ValidationError::EmptyThemeName` when the trimmed name is empty.
    pub fn register_theme(&mut self, name: &str) -> Result<ThemeRegistration, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyThemeName);
        }

        if let Some(existing) = self.canonical(trimmed) {
            return Ok(ThemeRegistration::Existing(existing.to_string()));
        }

        self.labels.push(trimmed.to_string());
        Ok(ThemeRegistration::Added(trimmed.to_string()))
    }

    /// Case-insensitive membership test.
    pub fn is_valid_theme(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }

    /// Returns the stored spelling of a case-insensitive match.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        let key = theme_key(name);
        self.labels
            .iter()
            .find(|label| theme_key(label) == key)
            .map(String::as_str)
    }

    /// Labels in registration order.
    pub fn themes(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn theme_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{ThemeRegistration, ThemeRegistry};
    use crate::error::ValidationError;

    #[test]
    fn register_trims_and_appends_in_order() {
        let mut registry = ThemeRegistry::new();
        registry.register_theme("  pricing ").unwrap();
        registry.register_theme("layout").unwrap();
        assert_eq!(registry.themes(), ["pricing", "layout"]);
    }

    #[test]
    fn register_is_case_insensitive_noop_for_existing() {
        let mut registry = ThemeRegistry::new();
        let first = registry.register_theme("Onboarding").unwrap();
        let second = registry.register_theme("ONBOARDING").unwrap();

        assert!(first.is_added());
        assert_eq!(second, ThemeRegistration::Existing("Onboarding".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_rejects_blank_names() {
        let mut registry = ThemeRegistry::new();
        let err = registry.register_theme(" \n ").expect_err("blank must fail");
        assert_eq!(err, ValidationError::EmptyThemeName);
        assert!(registry.is_empty());
    }

    #[test]
    fn validity_check_ignores_case() {
        let registry = ThemeRegistry::with_themes(["ai-input", "library"]).unwrap();
        assert!(registry.is_valid_theme("AI-Input"));
        assert_eq!(registry.canonical("LIBRARY"), Some("library"));
        assert!(!registry.is_valid_theme("pricing"));
    }
}
