//! Asset store: the raw-bytes side of sprite loading, and its inverse used by
//! the world baker.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use image::{ImageFormat, RgbaImage};

use crate::sprites::{AssetError, SpriteName};

/// Backing store for sprite assets.
///
/// `load` returns encoded bytes; decoding is the loader's job so that a corrupt
/// asset can be told apart from a missing one.
pub trait AssetStore: Send + Sync {
    fn load(&self, name: &SpriteName) -> Result<Vec<u8>, AssetError>;

    fn save(&self, name: &SpriteName, image: &RgbaImage) -> Result<(), AssetError>;
}

/// Flat directory of `<name>.png` files.
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &SpriteName) -> PathBuf {
        self.root.join(format!("{name}.png"))
    }
}

impl AssetStore for DirAssetStore {
    fn load(&self, name: &SpriteName) -> Result<Vec<u8>, AssetError> {
        let path = self.path_for(name);
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound(name.to_string()),
            _ => AssetError::Io {
                name: name.to_string(),
                reason: format!("{}: {e}", path.display()),
            },
        })
    }

    fn save(&self, name: &SpriteName, image: &RgbaImage) -> Result<(), AssetError> {
        let persist_err = |reason: String| AssetError::Persist {
            name: name.to_string(),
            reason,
        };

        fs::create_dir_all(&self.root)
            .map_err(|e| persist_err(format!("{}: {e}", self.root.display())))?;

        let path = self.path_for(name);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| persist_err(format!("{}: {e}", path.display())))
    }
}
