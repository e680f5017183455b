//! Preferred-team label resolution.
//!
//! Users type their favourite team as free text ("FURIA", "LOUD") while
//! players point at official teams identified by short-code ("FUR", "LOD").
//! A label resolves to a short-code by trying, in order:
//!
//! 1. the configured alias table,
//! 2. an official team whose `short_label` equals the label,
//! 3. the label itself, read as a short-code.
//!
//! Comparisons are exact after trimming surrounding whitespace. Literal labels
//! are case-sensitive, so "fur" does not match the stored short-code "FUR".

use crate::storage::OfficialTeam;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from preferred-team label to official short-code.
///
/// # Examples
///
/// ```rust
/// use futebol_app::query::AliasTable;
///
/// let aliases = AliasTable::default();
/// assert_eq!(aliases.resolve("FURIA", &[]).code, "FUR");
/// assert_eq!(aliases.resolve("PAIN", &[]).code, "PAIN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(BTreeMap<String, String>);

impl Default for AliasTable {
    fn default() -> Self {
        Self::from_pairs([("FURIA", "FUR"), ("LOUD", "LOD")])
    }
}

/// Which rule produced a resolved short-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasSource {
    Table,
    ShortLabel,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLabel {
    pub code: String,
    pub source: AliasSource,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_pairs<L, C>(pairs: impl IntoIterator<Item = (L, C)>) -> Self
    where
        L: Into<String>,
        C: Into<String>,
    {
        let mut table = Self::empty();
        for (label, code) in pairs {
            table.insert(label, code);
        }
        table
    }

    pub fn insert(&mut self, label: impl Into<String>, code: impl Into<String>) {
        let label = label.into().trim().to_string();
        let code = code.into().trim().to_string();
        self.0.insert(label, code);
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve `label` to the short-code it stands for.
    pub fn resolve(&self, label: &str, teams: &[OfficialTeam]) -> ResolvedLabel {
        let label = label.trim();

        if let Some(code) = self.get(label) {
            return ResolvedLabel {
                code: code.to_string(),
                source: AliasSource::Table,
            };
        }

        if let Some(team) = teams
            .iter()
            .find(|t| t.short_label.as_deref().map(str::trim) == Some(label))
        {
            return ResolvedLabel {
                code: team.short_code.clone(),
                source: AliasSource::ShortLabel,
            };
        }

        ResolvedLabel {
            code: label.to_string(),
            source: AliasSource::Literal,
        }
    }
}
