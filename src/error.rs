use thiserror::Error;

/// Errors that can occur while loading or validating a recipe table.
///
/// These are configuration errors: a table that fails here never becomes a graph.
#[derive(Error, Debug, Clone)]
pub enum TableError {
    #[error("Failed to parse recipe table JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read recipe table '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Item '{0}' is declared more than once in the recipe table")]
    DuplicateItem(String),

    #[error(
        "Component '{component}' is required by the recipe of '{parent}', but has no entry in the table"
    )]
    MissingComponent { component: String, parent: String },

    #[error("Invalid custom table data: {0}")]
    ConversionError(String),
}

/// Errors raised by structural queries against the recipe graph or the item catalog.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Item '{0}' is not in the recipe table")]
    UnknownItem(String),

    #[error("Recipe of '{item}' is cyclic: {}", .path.join(" -> "))]
    GraphCycle { item: String, path: Vec<String> },
}

/// Errors that can occur while deriving template images for the catalog.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("Failed to load asset for item '{item}': {reason}")]
    AssetLoad { item: String, reason: String },

    #[error("Scale factor must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error(
        "Scaling the sprite of '{item}' would produce a {width}x{height} image, which is too large"
    )]
    ImageTooLarge {
        item: String,
        width: u64,
        height: u64,
    },

    #[error("Scaling the sprite of '{item}' produced an empty {width}x{height} image")]
    EmptyImage {
        item: String,
        width: u32,
        height: u32,
    },
}
