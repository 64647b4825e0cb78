//! Decoding a named asset into an immutable [`Sprite`].

use image::RgbaImage;
use tracing::info;

use crate::sprites::{AssetError, AssetStore, SpriteName};

/// A decoded raster image plus the name it was loaded under. Never mutated
/// after load.
#[derive(Debug)]
pub struct Sprite {
    pub name: SpriteName,
    pub image: RgbaImage,
}

impl Sprite {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Reads `name` from the store and decodes it. No caching.
pub fn load_sprite(store: &dyn AssetStore, name: &SpriteName) -> Result<Sprite, AssetError> {
    info!("Loading sprite {name}");
    let bytes = store.load(name)?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| AssetError::Corrupt {
            name: name.to_string(),
            reason: e.to_string(),
        })?
        .to_rgba8();

    Ok(Sprite {
        name: name.clone(),
        image,
    })
}
