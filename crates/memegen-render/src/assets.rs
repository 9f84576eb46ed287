//! Pixel sources for character assets.

use crate::renderer::{RenderResult, RendererError};
use image::RgbaImage;
use memegen_core::assets::CharacterAsset;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves a catalog entry to decoded pixels.
pub trait AssetSource {
    fn load(&mut self, asset: &CharacterAsset) -> RenderResult<Arc<RgbaImage>>;
}

/// Reads `<root>/<file_name>` from disk, caching decoded images.
#[derive(Debug, Clone)]
pub struct DirectoryAssetSource {
    root: PathBuf,
    cache: HashMap<String, Arc<RgbaImage>>,
}

impl DirectoryAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }
}

impl AssetSource for DirectoryAssetSource {
    fn load(&mut self, asset: &CharacterAsset) -> RenderResult<Arc<RgbaImage>> {
        if let Some(image) = self.cache.get(&asset.key) {
            return Ok(Arc::clone(image));
        }
        let path = self.root.join(&asset.file_name);
        let image = image::open(&path).map_err(|err| {
            log::error!("Failed to load {}: {err}", path.display());
            RendererError::MissingAsset(asset.key.clone())
        })?;
        let image = Arc::new(image.to_rgba8());
        self.cache.insert(asset.key.clone(), Arc::clone(&image));
        Ok(image)
    }
}

/// Pre-decoded images keyed by asset key.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    images: HashMap<String, Arc<RgbaImage>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, image: RgbaImage) {
        self.images.insert(key.into(), Arc::new(image));
    }

    pub fn with(mut self, key: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(key, image);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&mut self, asset: &CharacterAsset) -> RenderResult<Arc<RgbaImage>> {
        self.images
            .get(&asset.key)
            .cloned()
            .ok_or_else(|| RendererError::MissingAsset(asset.key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_memory_source() {
        let mut source = MemoryAssetSource::new().with("Troll", RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let troll = CharacterAsset::new("Troll", "Troll.webp");
        assert_eq!(source.load(&troll).unwrap().dimensions(), (2, 2));

        let missing = CharacterAsset::new("Me Gusta", "Me Gusta.webp");
        assert!(matches!(source.load(&missing), Err(RendererError::MissingAsset(key)) if key == "Me Gusta"));
    }

    #[test]
    fn test_directory_source_missing_file() {
        let mut source = DirectoryAssetSource::new("/nonexistent/memegen/assets");
        let troll = CharacterAsset::new("Troll", "Troll.webp");
        assert!(matches!(source.load(&troll), Err(RendererError::MissingAsset(_))));
    }
}
