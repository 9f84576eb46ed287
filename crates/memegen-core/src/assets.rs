//! Catalog of clip-art characters that can be placed on the canvas.

use serde::{Deserialize, Serialize};

/// Names of the bundled rage-face characters.
const RAGE_FACES: [&str; 20] = [
    "Bitch Please",
    "Confused Derp",
    "Crying Herp",
    "Derpette",
    "Forever Alone",
    "Fuck No",
    "FUUUUUUU",
    "Grrrr",
    "Happy Herp",
    "Happy Herpette",
    "Herp",
    "Herpette",
    "Indifferent Herp",
    "Lauging Herpette",
    "Lolguy",
    "Me Gusta",
    "Precious",
    "Rageguy",
    "Troll",
    "Y U NO",
];

/// A character asset reference. Carries no pixels; renderers resolve
/// `file_name` through their own asset source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterAsset {
    /// Stable lookup key.
    pub key: String,
    /// File name relative to the asset directory.
    pub file_name: String,
}

impl CharacterAsset {
    pub fn new(key: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            file_name: file_name.into(),
        }
    }
}

/// The fixed set of characters offered by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    assets: Vec<CharacterAsset>,
}

impl AssetCatalog {
    pub fn new(assets: Vec<CharacterAsset>) -> Self {
        Self { assets }
    }

    /// The bundled rage-face set (`<name>.webp` files).
    pub fn rage_faces() -> Self {
        Self::new(
            RAGE_FACES
                .iter()
                .map(|name| CharacterAsset::new(*name, format!("{name}.webp")))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&CharacterAsset> {
        self.assets.iter().find(|asset| asset.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterAsset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::rage_faces()
    }
}
