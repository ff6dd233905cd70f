use super::definition::RecipeTable;
use crate::error::TableError;

const ARCHNEMESIS_JSON: &str = include_str!("../../data/archnemesis.json");

impl RecipeTable {
    /// The embedded Archnemesis modifier table, in in-game display order.
    pub fn archnemesis() -> Result<Self, TableError> {
        Self::from_json(ARCHNEMESIS_JSON)
    }
}
