use crate::error::TemplateError;
use ahash::AHashMap;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Where raw item sprites come from.
///
/// Implementations must return the sprite with its alpha channel intact; transparency is
/// resolved later by the template pipeline.
pub trait AssetSource {
    fn load(&self, item: &str) -> Result<RgbaImage, TemplateError>;
}

/// Loads `<root>/<item>.png` for each item.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, item: &str) -> PathBuf {
        self.root.join(format!("{}.png", item))
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, item: &str) -> Result<RgbaImage, TemplateError> {
        let path = self.path_for(item);
        let image = image::open(&path).map_err(|e| TemplateError::AssetLoad {
            item: item.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })?;
        Ok(image.to_rgba8())
    }
}

/// Sprites held in memory, keyed by item name.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    sprites: AHashMap<String, RgbaImage>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, item: S, sprite: RgbaImage) -> Option<RgbaImage> {
        self.sprites.insert(item.into(), sprite)
    }

    pub fn with<S: Into<String>>(mut self, item: S, sprite: RgbaImage) -> Self {
        self.insert(item, sprite);
        self
    }

    pub fn remove(&mut self, item: &str) -> Option<RgbaImage> {
        self.sprites.remove(item)
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, item: &str) -> Result<RgbaImage, TemplateError> {
        self.sprites
            .get(item)
            .cloned()
            .ok_or_else(|| TemplateError::AssetLoad {
                item: item.to_string(),
                reason: "no sprite registered".to_string(),
            })
    }
}

impl<T: AssetSource + ?Sized> AssetSource for Box<T> {
    fn load(&self, item: &str) -> Result<RgbaImage, TemplateError> {
        (**self).load(item)
    }
}
