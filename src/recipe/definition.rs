use crate::error::TableError;
use serde::{Deserialize, Serialize};
use std::fs;

/// A single row of the composition table: an item and the components that produce it.
///
/// An empty `components` list marks a base item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecipeEntry {
    pub name: String,
    #[serde(default)]
    pub components: Vec<String>,
}

impl RecipeEntry {
    pub fn new<S: Into<String>>(name: S, components: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_base(&self) -> bool {
        self.components.is_empty()
    }
}

/// The canonical, ordered composition table that a `RecipeGraph` is built from.
///
/// Declaration order is preserved everywhere because it is the order items are shown to users.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecipeTable {
    pub entries: Vec<RecipeEntry>,
}

impl RecipeTable {
    pub fn new(entries: Vec<RecipeEntry>) -> Self {
        Self { entries }
    }

    /// Parses a table from a JSON array of `{ "name": ..., "components": [...] }` objects.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        serde_json::from_str(json).map_err(|e| TableError::JsonParseError(e.to_string()))
    }

    /// Loads a table from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, TableError> {
        let content = fs::read_to_string(path).map_err(|e| TableError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, TableError> {
        serde_json::to_string_pretty(self).map_err(|e| TableError::JsonParseError(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<S>)> for RecipeTable {
    fn from_iter<I: IntoIterator<Item = (S, Vec<S>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, components)| RecipeEntry::new(name, components))
                .collect(),
        }
    }
}
