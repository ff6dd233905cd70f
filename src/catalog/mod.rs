use crate::error::{GraphError, TemplateError};
use crate::graph::{ExpansionNode, RecipeGraph};
use crate::template::{
    AssetSource, RenderedAsset, ScanTemplate, TemplateConfig, TemplateImageBuilder,
    validate_scale,
};
use ahash::AHashMap;
use image::RgbaImage;

/// The scale a catalog is built at unless told otherwise.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Every item of a recipe graph together with its derived images at the current scale.
///
/// The image cache is built eagerly and only ever replaced as a whole: a rebuild assembles a
/// complete new cache first and swaps it in on success, so readers never see two scales mixed.
pub struct ItemCatalog<S: AssetSource> {
    graph: RecipeGraph,
    source: S,
    builder: TemplateImageBuilder,
    scale: f64,
    image_size: (u32, u32),
    assets: AHashMap<String, RenderedAsset>,
}

pub struct CatalogBuilder<S: AssetSource> {
    graph: RecipeGraph,
    source: S,
    scale: f64,
    config: TemplateConfig,
}

impl<S: AssetSource> CatalogBuilder<S> {
    pub fn new(graph: RecipeGraph, source: S) -> Self {
        Self {
            graph,
            source,
            scale: DEFAULT_SCALE,
            config: TemplateConfig::default(),
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn template_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn small_icon_size(mut self, size: u32) -> Self {
        self.config.small_icon_size = size;
        self
    }

    /// Validates the scale and renders every item.
    pub fn build(self) -> Result<ItemCatalog<S>, TemplateError> {
        let scale = validate_scale(self.scale)?;
        let builder = TemplateImageBuilder::new(self.config);
        let (assets, image_size) = render_all(&self.graph, &self.source, &builder, scale)?;
        Ok(ItemCatalog {
            graph: self.graph,
            source: self.source,
            builder,
            scale,
            image_size,
            assets,
        })
    }
}

impl<S: AssetSource> ItemCatalog<S> {
    pub fn builder(graph: RecipeGraph, source: S) -> CatalogBuilder<S> {
        CatalogBuilder::new(graph, source)
    }

    /// Builds a catalog with the default template configuration.
    pub fn new(graph: RecipeGraph, source: S, scale: f64) -> Result<Self, TemplateError> {
        Self::builder(graph, source).scale(scale).build()
    }

    /// Re-renders every item at `scale`.
    ///
    /// On error the catalog keeps its previous scale and images untouched.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), TemplateError> {
        let scale = validate_scale(scale)?;
        let (assets, image_size) = render_all(&self.graph, &self.source, &self.builder, scale)?;
        self.assets = assets;
        self.image_size = image_size;
        self.scale = scale;
        Ok(())
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Width and height of the most recently rendered full-scale image.
    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    /// Width and height of one item's full-scale image.
    pub fn image_size_of(&self, item: &str) -> Result<(u32, u32), GraphError> {
        self.asset(item).map(|asset| asset.display_image.dimensions())
    }

    pub fn small_icon_size(&self) -> u32 {
        self.builder.config().small_icon_size
    }

    pub fn template_config(&self) -> &TemplateConfig {
        self.builder.config()
    }

    pub fn graph(&self) -> &RecipeGraph {
        &self.graph
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the asset source. Changes take effect on the next `set_scale`.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn asset(&self, item: &str) -> Result<&RenderedAsset, GraphError> {
        self.assets
            .get(item)
            .ok_or_else(|| GraphError::UnknownItem(item.to_string()))
    }

    pub fn scan_template(&self, item: &str) -> Result<&ScanTemplate, GraphError> {
        self.asset(item).map(|asset| &asset.scan_template)
    }

    pub fn display_image(&self, item: &str) -> Result<&RgbaImage, GraphError> {
        self.asset(item).map(|asset| &asset.display_image)
    }

    pub fn small_display_image(&self, item: &str) -> Result<&RgbaImage, GraphError> {
        self.asset(item).map(|asset| &asset.small_display_image)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.items()
    }

    pub fn recipes_with_components(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.graph.recipes_with_components()
    }

    pub fn components_of(&self, item: &str) -> Result<&[String], GraphError> {
        self.graph.components_of(item)
    }

    pub fn producers_of(&self, item: &str) -> Result<Vec<&str>, GraphError> {
        self.graph.producers_of(item)
    }

    pub fn expand(&self, item: &str) -> Result<ExpansionNode, GraphError> {
        self.graph.expand(item)
    }
}

/// Renders every item of the graph into a fresh cache. Any failure aborts the whole pass.
fn render_all<S: AssetSource>(
    graph: &RecipeGraph,
    source: &S,
    builder: &TemplateImageBuilder,
    scale: f64,
) -> Result<(AHashMap<String, RenderedAsset>, (u32, u32)), TemplateError> {
    tracing::info!(items = graph.len(), scale, "Rendering item catalog");

    let mut assets = AHashMap::with_capacity(graph.len());
    let mut image_size = (0, 0);
    for item in graph.items() {
        let raw = source.load(item)?;
        let asset = builder.build(item, &raw, scale)?;
        let size = asset.display_image.dimensions();
        if !assets.is_empty() && size != image_size {
            tracing::warn!(
                item,
                width = size.0,
                height = size.1,
                "Sprite size differs from the rest of the catalog"
            );
        }
        tracing::debug!(item, width = size.0, height = size.1, "Rendered item");
        image_size = size;
        assets.insert(item.to_string(), asset);
    }

    Ok((assets, image_size))
}
