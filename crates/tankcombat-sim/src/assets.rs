//! Image/asset collaborator.
//!
//! The simulation never decodes images. It only asks a provider for the
//! pixel size of a sprite so that collision footprints can match it.

use std::collections::HashMap;

use tracing::warn;

use tankcombat_core::types::Size;

use crate::unit::Unit;

/// What the simulation needs to know about a loaded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// Loads images by path. Never fails loudly: a missing or unreadable
/// image is `None`.
pub trait ImageProvider {
    fn load_image(&self, path: &str) -> Option<ImageInfo>;
}

/// Headless provider: no images load.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullImageProvider;

impl ImageProvider for NullImageProvider {
    fn load_image(&self, _path: &str) -> Option<ImageInfo> {
        None
    }
}

/// Provider backed by a fixed table of known images.
#[derive(Debug, Clone, Default)]
pub struct StaticImageProvider {
    images: HashMap<String, ImageInfo>,
}

impl StaticImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<String>, info: ImageInfo) -> Self {
        self.images.insert(path.into(), info);
        self
    }
}

impl ImageProvider for StaticImageProvider {
    fn load_image(&self, path: &str) -> Option<ImageInfo> {
        self.images.get(path).copied()
    }
}

/// Size a unit from its body image. On failure the unit keeps its
/// configured footprint and a warning is logged.
pub fn apply_body_image(unit: &mut Unit, images: &dyn ImageProvider) {
    let Some(path) = unit.config().body_image_path.clone() else {
        return;
    };
    match images.load_image(&path) {
        Some(info) if info.width > 0 && info.height > 0 => unit.set_size(info.size()),
        _ => warn!(%path, "cannot load unit image, keeping default size"),
    }
}
