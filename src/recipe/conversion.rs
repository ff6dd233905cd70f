use super::definition::RecipeTable;
use crate::error::TableError;

/// A trait for custom data models that can be converted into a `RecipeTable`.
///
/// This keeps the graph engine independent of any particular game's dataset. Implement it
/// on whatever structure your own data loads into, and hand the result to `RecipeGraph::new`.
///
/// # Example
///
/// ```rust,no_run
/// use gousei::error::TableError;
/// use gousei::recipe::{IntoRecipeTable, RecipeEntry, RecipeTable};
///
/// struct Fusion { result: String, inputs: Vec<String> }
/// struct FusionSheet { fusions: Vec<Fusion>, bases: Vec<String> }
///
/// impl IntoRecipeTable for FusionSheet {
///     fn into_recipe_table(self) -> Result<RecipeTable, TableError> {
///         let mut entries: Vec<RecipeEntry> = self
///             .fusions
///             .into_iter()
///             .map(|f| RecipeEntry { name: f.result, components: f.inputs })
///             .collect();
///         for name in self.bases {
///             entries.push(RecipeEntry { name, components: vec![] });
///         }
///         Ok(RecipeTable::new(entries))
///     }
/// }
/// ```
pub trait IntoRecipeTable {
    /// Consumes the object and converts it into a canonical recipe table.
    fn into_recipe_table(self) -> Result<RecipeTable, TableError>;
}

impl IntoRecipeTable for RecipeTable {
    fn into_recipe_table(self) -> Result<RecipeTable, TableError> {
        Ok(self)
    }
}

impl<'a> IntoRecipeTable for &'a [(&'a str, &'a [&'a str])] {
    fn into_recipe_table(self) -> Result<RecipeTable, TableError> {
        Ok(self
            .iter()
            .map(|(name, components)| (*name, components.to_vec()))
            .collect())
    }
}
