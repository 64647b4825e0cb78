//! Board rendering service: sprite cache, board geometry, layered compositor
//! and world baker, plus the axum surface that exposes them.

pub mod board;
pub mod config;
pub mod errors;
pub mod routes;
pub mod sprites;
pub mod state;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::board::BoardCompositor;
use crate::config::Config;
use crate::sprites::{AssetStore, DirAssetStore, SpriteCache};

/// Wires the asset store, sprite cache and compositor described by `config`.
pub fn build_compositor(config: &Config) -> Result<(Arc<dyn AssetStore>, Arc<BoardCompositor>)> {
    let store: Arc<dyn AssetStore> = Arc::new(DirAssetStore::new(&config.asset_dir));
    info!("Serving sprites from {}", config.asset_dir.display());

    let cache = Arc::new(SpriteCache::new(Arc::clone(&store)));
    let mut compositor = BoardCompositor::new(cache);
    if let Some(font) = config.load_label_font()? {
        compositor = compositor.with_label_font(font);
        info!("Using configured label font");
    }

    Ok((store, Arc::new(compositor)))
}
