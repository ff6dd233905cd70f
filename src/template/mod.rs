//! Derivation of scan templates and display images from raw item sprites.
//!
//! The pipeline is a pure function of the sprite, the scale factor and a [`TemplateConfig`]:
//!
//! 1. scale by `scale`, truncating the new width and height to integers;
//! 2. composite onto an opaque solid background;
//! 3. reorder the channels to BGR, the order the scanner matches in;
//! 4. crop to the fixed margin rectangle, which yields the scan template.
//!
//! The composited image from step 2 is the display image, and a fixed-size square resize of
//! it is the small display image. Given the same inputs the output is identical byte for byte,
//! so matching thresholds tuned against one build stay valid for the next.

use crate::error::TemplateError;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

mod source;

pub use source::{AssetSource, DirectoryAssets, MemoryAssets};

/// Background behind transparent sprite pixels, as RGB.
pub const DEFAULT_BACKGROUND: [u8; 3] = [10, 10, 32];

/// Side length of the small display image, in pixels.
pub const SMALL_ICON_SIZE: u32 = 30;

/// Crop rectangle that cuts away the decorative frame shared by all sprites.
pub const DEFAULT_MARGINS: CropMargins = CropMargins {
    top: 0.16,
    bottom: 0.75,
    left: 0.16,
    right: 0.85,
};

/// Largest image, in pixels, the pipeline will allocate for one sprite.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 26;

/// Resampling filter used for both scaling steps.
const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Edges of the crop rectangle as fractions of the image size, measured from the top-left corner.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CropMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl CropMargins {
    /// The `(x, y, width, height)` crop rectangle for an image of the given size.
    ///
    /// Every edge is truncated towards zero independently, so a 100x100 image with the
    /// default margins crops to x 16..85 and y 16..75.
    pub fn rect(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let edge = |size: u32, fraction: f64| ((size as f64 * fraction) as u32).min(size);
        let (left, right) = (edge(width, self.left), edge(width, self.right));
        let (top, bottom) = (edge(height, self.top), edge(height, self.bottom));
        (left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }
}

impl Default for CropMargins {
    fn default() -> Self {
        DEFAULT_MARGINS
    }
}

/// Fixed parameters of the template pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TemplateConfig {
    pub background: [u8; 3],
    pub margins: CropMargins,
    pub small_icon_size: u32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            margins: DEFAULT_MARGINS,
            small_icon_size: SMALL_ICON_SIZE,
        }
    }
}

/// An opaque image stored in BGR channel order, ready for pixel matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTemplate {
    bgr: RgbImage,
}

impl ScanTemplate {
    pub fn width(&self) -> u32 {
        self.bgr.width()
    }

    pub fn height(&self) -> u32 {
        self.bgr.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.bgr.dimensions()
    }

    /// The `[b, g, r]` value of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.bgr.get_pixel(x, y).0
    }

    /// Row-major BGR bytes, three per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        self.bgr.as_raw()
    }

    /// Converts back to conventional RGB order, e.g. for saving to disk.
    pub fn to_rgb_image(&self) -> RgbImage {
        swap_red_blue(&self.bgr)
    }
}

/// The three images derived from one sprite at one scale.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAsset {
    pub scan_template: ScanTemplate,
    pub display_image: RgbaImage,
    pub small_display_image: RgbaImage,
}

/// Rejects scale factors that are zero, negative, NaN or infinite.
pub fn validate_scale(scale: f64) -> Result<f64, TemplateError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(TemplateError::InvalidScale(scale))
    }
}

/// Size of an image after scaling, each side truncated (not rounded) to an integer.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (
        (width as f64 * scale) as u32,
        (height as f64 * scale) as u32,
    )
}

/// Rejects RGBA buffers with a side beyond `u32` or more than [`MAX_IMAGE_PIXELS`] pixels.
fn check_allocation(item: &str, width: u64, height: u64) -> Result<(), TemplateError> {
    let too_large = || TemplateError::ImageTooLarge {
        item: item.to_string(),
        width,
        height,
    };
    if width > u32::MAX as u64 || height > u32::MAX as u64 {
        return Err(too_large());
    }
    let pixels = width.checked_mul(height).ok_or_else(too_large)?;
    pixels.checked_mul(4).ok_or_else(too_large)?;
    if pixels > MAX_IMAGE_PIXELS {
        return Err(too_large());
    }
    Ok(())
}

/// Runs the template pipeline for individual sprites.
#[derive(Debug, Clone, Default)]
pub struct TemplateImageBuilder {
    config: TemplateConfig,
}

impl TemplateImageBuilder {
    pub fn new(config: TemplateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Derives all three images for `item` from its raw sprite.
    pub fn build(
        &self,
        item: &str,
        raw: &RgbaImage,
        scale: f64,
    ) -> Result<RenderedAsset, TemplateError> {
        let scale = validate_scale(scale)?;
        let scaled = self.scale(item, raw, scale)?;
        let display_image = self.composite(&scaled);
        let scan_template = self.crop(&ScanTemplate {
            bgr: swap_red_blue_opaque(&display_image),
        });
        let size = self.config.small_icon_size;
        check_allocation(item, size as u64, size as u64)?;
        let small_display_image = imageops::resize(&display_image, size, size, RESAMPLE_FILTER);

        Ok(RenderedAsset {
            scan_template,
            display_image,
            small_display_image,
        })
    }

    /// Resizes the sprite by `scale`. An unchanged size returns an exact copy.
    pub fn scale(
        &self,
        item: &str,
        raw: &RgbaImage,
        scale: f64,
    ) -> Result<RgbaImage, TemplateError> {
        // Sides are measured in f64 first; a plain `as u32` would saturate silently.
        let exact_width = (raw.width() as f64 * scale).trunc();
        let exact_height = (raw.height() as f64 * scale).trunc();
        check_allocation(item, exact_width as u64, exact_height as u64)?;

        let (width, height) = scaled_dimensions(raw.width(), raw.height(), scale);
        if width == 0 || height == 0 {
            return Err(TemplateError::EmptyImage {
                item: item.to_string(),
                width,
                height,
            });
        }
        if (width, height) == raw.dimensions() {
            return Ok(raw.clone());
        }
        let resized = imageops::resize(&premultiply(raw), width, height, RESAMPLE_FILTER);
        Ok(unpremultiply(&resized))
    }

    /// Alpha-composites the image over the configured background; the result is fully opaque.
    pub fn composite(&self, image: &RgbaImage) -> RgbaImage {
        let [bg_r, bg_g, bg_b] = self.config.background;
        RgbaImage::from_fn(image.width(), image.height(), |x, y| {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            Rgba([
                blend(r, bg_r, a),
                blend(g, bg_g, a),
                blend(b, bg_b, a),
                u8::MAX,
            ])
        })
    }

    /// Crops a BGR image to the configured margin rectangle.
    pub fn crop(&self, normalized: &ScanTemplate) -> ScanTemplate {
        let (x, y, width, height) = self
            .config
            .margins
            .rect(normalized.width(), normalized.height());
        ScanTemplate {
            bgr: imageops::crop_imm(&normalized.bgr, x, y, width, height).to_image(),
        }
    }
}

/// `src` over `dst` with coverage `alpha`, rounded to the nearest integer.
fn blend(src: u8, dst: u8, alpha: u8) -> u8 {
    let alpha = alpha as u32;
    let value = (src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255;
    value as u8
}

/// Scales colour by alpha so fully transparent pixels carry no colour into resampling.
fn premultiply(image: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        Rgba([blend(r, 0, a), blend(g, 0, a), blend(b, 0, a), a])
    })
}

fn unpremultiply(image: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let restore = |c: u8| match a {
            0 => 0,
            _ => ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8,
        };
        Rgba([restore(r), restore(g), restore(b), a])
    })
}

fn swap_red_blue(image: &RgbImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [c0, c1, c2] = image.get_pixel(x, y).0;
        Rgb([c2, c1, c0])
    })
}

/// Drops alpha and reorders RGB to BGR.
fn swap_red_blue_opaque(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        Rgb([b, g, r])
    })
}
