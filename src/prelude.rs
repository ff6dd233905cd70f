//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the gousei crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use gousei::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let table = RecipeTable::from_file("path/to/recipes.json")?;
//! let graph = RecipeGraph::new(table)?;
//!
//! let catalog = ItemCatalog::new(graph, DirectoryAssets::new("path/to/sprites"), 1.0)?;
//! for item in catalog.items() {
//!     println!("{}: {:?}", item, catalog.producers_of(item)?);
//! }
//! # Ok(())
//! # }
//! ```

// Graph and catalog
pub use crate::catalog::{CatalogBuilder, ItemCatalog};
pub use crate::graph::{ExpansionNode, RecipeGraph};

// Table definitions
pub use crate::recipe::{IntoRecipeTable, RecipeEntry, RecipeTable};

// Template pipeline
pub use crate::template::{
    AssetSource, CropMargins, DirectoryAssets, MemoryAssets, RenderedAsset, ScanTemplate,
    TemplateConfig, TemplateImageBuilder,
};

// Error types
pub use crate::error::{GraphError, TableError, TemplateError};

// Tree formatting
pub use crate::trace::TreeFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
