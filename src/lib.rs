//! # Gousei - Recipe Graph and Template Image Catalog
//!
//! **Gousei** is the data core of a crafting assistant. It knows, for every item of a
//! combination-based crafting system, which smaller items combine to produce it, and it derives
//! the images used to recognise those items on screen and to show them in a UI.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Table**: Parse a `RecipeTable` from JSON, use the embedded
//!     `RecipeTable::archnemesis()`, or implement `IntoRecipeTable` for your own format.
//! 2.  **Build the Graph**: `RecipeGraph::new` validates the table and answers structural
//!     queries: components, producers, and full expansion down to base items.
//! 3.  **Render the Catalog**: `ItemCatalog::builder` loads one sprite per item from an
//!     `AssetSource` and derives a scan template, a display image and a small display image.
//! 4.  **Rescale**: `ItemCatalog::set_scale` re-renders everything atomically when the
//!     on-screen scale changes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gousei::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph = RecipeGraph::new(RecipeTable::archnemesis()?)?;
//!     let mut catalog = ItemCatalog::builder(graph, DirectoryAssets::new("pictures"))
//!         .scale(1.0)
//!         .build()?;
//!
//!     for (item, recipe) in catalog.recipes_with_components() {
//!         println!("{} <- {}", item, recipe.join(" + "));
//!     }
//!
//!     let tree = catalog.expand("奇塔弗之触")?;
//!     println!("{}", TreeFormatter::format_leaf_counts(&tree));
//!
//!     catalog.set_scale(0.8)?;
//!     let template = catalog.scan_template("奇塔弗之触")?;
//!     println!("Template is {}x{}", template.width(), template.height());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod recipe;
pub mod template;
pub mod trace;
