use crate::error::{GraphError, TableError};
use crate::recipe::{IntoRecipeTable, RecipeEntry};
use ahash::AHashMap;
use itertools::Itertools;

mod expansion;

pub use expansion::ExpansionNode;

/// The composition graph of a crafting system.
///
/// Built once from a `RecipeTable` and immutable afterwards. Every component named by a recipe
/// must itself be an entry of the table; this is checked in [`RecipeGraph::new`].
/// Cycles are not rejected here, but [`RecipeGraph::expand`] detects them.
#[derive(Debug, Clone)]
pub struct RecipeGraph {
    entries: Vec<RecipeEntry>,
    index: AHashMap<String, usize>,
    /// For each entry, the indices of the entries whose recipe uses it, in declaration order.
    producers: Vec<Vec<usize>>,
}

impl RecipeGraph {
    /// Validates a table and builds the graph and its reverse (producer) index.
    pub fn new<T: IntoRecipeTable>(table: T) -> Result<Self, TableError> {
        let entries = table.into_recipe_table()?.entries;

        let mut index: AHashMap<String, usize> = AHashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(TableError::DuplicateItem(entry.name.clone()));
            }
        }

        let mut producers: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
        for (parent, entry) in entries.iter().enumerate() {
            // A recipe may list the same component twice; it still has one producer.
            for component in entry.components.iter().unique() {
                let child = *index
                    .get(component)
                    .ok_or_else(|| TableError::MissingComponent {
                        component: component.clone(),
                        parent: entry.name.clone(),
                    })?;
                producers[child].push(parent);
            }
        }

        tracing::debug!(
            items = entries.len(),
            recipes = entries.iter().filter(|e| !e.is_base()).count(),
            "Built recipe graph"
        );

        Ok(Self {
            entries,
            index,
            producers,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.index.contains_key(item)
    }

    /// All item names, in table declaration order. Each call starts a fresh iteration.
    pub fn items(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// `(item, recipe)` pairs for every item that has a non-empty recipe, in declaration order.
    pub fn recipes_with_components(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.entries
            .iter()
            .filter(|e| !e.is_base())
            .map(|e| (e.name.as_str(), e.components.as_slice()))
    }

    /// Items with an empty recipe, in declaration order.
    pub fn base_items(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(|e| e.is_base())
            .map(|e| e.name.as_str())
    }

    /// The declared recipe of `item`. Base items yield an empty slice.
    pub fn components_of(&self, item: &str) -> Result<&[String], GraphError> {
        self.entry(item).map(|e| e.components.as_slice())
    }

    /// Every item whose recipe lists `item` as a component, in declaration order.
    ///
    /// Unknown names are an error here as well, so that "not used by anything" and
    /// "does not exist" can be told apart.
    pub fn producers_of(&self, item: &str) -> Result<Vec<&str>, GraphError> {
        let position = self.position(item)?;
        Ok(self.producers[position]
            .iter()
            .map(|&parent| self.entries[parent].name.as_str())
            .collect())
    }

    /// Expands `item` into its full composition tree, down to base items.
    ///
    /// Shared components are repeated once per occurrence, so the tree can grow
    /// exponentially with recipe depth.
    pub fn expand(&self, item: &str) -> Result<ExpansionNode, GraphError> {
        expansion::expand(self, item)
    }

    fn position(&self, item: &str) -> Result<usize, GraphError> {
        self.index
            .get(item)
            .copied()
            .ok_or_else(|| GraphError::UnknownItem(item.to_string()))
    }

    fn entry(&self, item: &str) -> Result<&RecipeEntry, GraphError> {
        self.position(item).map(|position| &self.entries[position])
    }
}
