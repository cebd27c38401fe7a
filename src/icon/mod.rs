//! Icon sources, shared templates, and per-item drawables.

pub mod resolver;

pub use resolver::{FsIconResolver, IconCallback, IconResolver, MemoryIconResolver};

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::IconError;
use crate::graphics::Color;

/// Where an icon's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconSource {
    /// A named resource resolved by the embedder.
    Named(String),
    /// A file on disk.
    File(PathBuf),
    /// Raw encoded bytes (PNG and friends).
    Bytes(Arc<Vec<u8>>),
}

/// A decoded, shareable icon template.
///
/// Templates may be cached and handed to several menu items at once, so
/// they are never mutated. Rendering state lives on [`Drawable`].
#[derive(Debug, Clone)]
pub struct Image {
    pixels: Arc<RgbaImage>,
}

impl Image {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decode encoded bytes into a template.
    pub fn decode(bytes: &[u8]) -> Result<Self, IconError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether two images share the same underlying pixel buffer.
    pub fn shares_pixels(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// A per-item rendering of an icon template.
///
/// Deriving a drawable from a template copies only rendering state; the
/// pixel buffer stays shared and untouched, so tinting one item never
/// bleeds into another item using the same cached template.
#[derive(Debug, Clone)]
pub struct Drawable {
    image: Image,
    tint: Option<Color>,
    alpha: u8,
}

impl Drawable {
    /// Start a fresh, fully opaque drawable from a shared template.
    pub fn from_template(image: &Image) -> Self {
        Self {
            image: image.clone(),
            tint: None,
            alpha: 255,
        }
    }

    /// Apply a tint color filter.
    pub fn set_color_filter(&mut self, color: Color) {
        self.tint = Some(color);
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    pub fn tint(&self) -> Option<Color> {
        self.tint
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn image(&self) -> &Image {
        &self.image
    }
}
