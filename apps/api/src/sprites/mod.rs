// Sprite resolution: name normalization, asset store access, decoding and the
// process-wide single-flight cache shared by every render.

pub mod cache;
pub mod loader;
pub mod name;
pub mod store;

use thiserror::Error;

pub use cache::SpriteCache;
pub use loader::{load_sprite, Sprite};
pub use name::SpriteName;
pub use store::{AssetStore, DirAssetStore};

/// Failures while reading, decoding or writing a sprite asset.
///
/// Carries only owned strings so one failed load can be handed to every caller
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("invalid sprite name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("sprite not found: {0}")]
    NotFound(String),

    #[error("sprite {name} could not be decoded: {reason}")]
    Corrupt { name: String, reason: String },

    #[error("I/O error reading sprite {name}: {reason}")]
    Io { name: String, reason: String },

    #[error("could not persist sprite {name}: {reason}")]
    Persist { name: String, reason: String },

    #[error("load of sprite {0} was abandoned before completing")]
    Abandoned(String),
}

#[cfg(test)]
pub(crate) mod testing;
