//! Pre-rendering a background + border pair into a reusable world sprite.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::board::{BoardCompositor, BoardConfig, BoardLayout, RenderError};
use crate::sprites::{AssetError, AssetStore, Sprite, SpriteName};

#[derive(Debug, Error)]
pub enum BakeError {
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Unlike a per-request render, a bake refuses to silently drop the border.
    #[error("border sprite {name} unavailable: {source}")]
    MissingBorder {
        name: String,
        #[source]
        source: AssetError,
    },

    /// Baked worlds are authoring references and always carry labels.
    #[error("no label font loaded; cannot draw world labels")]
    MissingLabelFont,

    #[error("failed to save world {name}: {source}")]
    Persist {
        name: String,
        #[source]
        source: AssetError,
    },
}

pub struct WorldBaker {
    compositor: Arc<BoardCompositor>,
    store: Arc<dyn AssetStore>,
}

impl WorldBaker {
    pub fn new(compositor: Arc<BoardCompositor>, store: Arc<dyn AssetStore>) -> Self {
        Self { compositor, store }
    }

    /// Renders `background` (+ `border`) with an empty, labelled grid and saves
    /// it as `<world>-world`.
    pub fn bake(
        &self,
        world: &str,
        background: &str,
        border: Option<&str>,
        config: &BoardConfig,
    ) -> Result<Sprite, BakeError> {
        let target = SpriteName::world(world).map_err(invalid)?;
        let background = SpriteName::parse(background).map_err(invalid)?;
        let border = border.map(SpriteName::parse).transpose().map_err(invalid)?;

        if !self.compositor.has_label_font() {
            return Err(BakeError::MissingLabelFont);
        }

        if let Some(border) = &border {
            self.compositor
                .cache()
                .resolve_name(border)
                .map_err(|source| BakeError::MissingBorder {
                    name: border.to_string(),
                    source,
                })?;
        }

        let config = config.clone().with_labels(true);
        let layout = BoardLayout::empty(&config, background, border);
        let image = self.compositor.render(&config, &layout)?;

        self.store
            .save(&target, &image)
            .map_err(|source| BakeError::Persist {
                name: target.to_string(),
                source,
            })?;

        info!("Saved world {target}");
        Ok(Sprite {
            name: target,
            image,
        })
    }
}

fn invalid(e: AssetError) -> BakeError {
    BakeError::Render(RenderError::InvalidLayout(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::testing::MemoryStore;
    use crate::sprites::SpriteCache;
    use image::{Rgba, RgbaImage};

    struct ReadOnlyStore(MemoryStore);

    impl AssetStore for ReadOnlyStore {
        fn load(&self, name: &SpriteName) -> Result<Vec<u8>, AssetError> {
            self.0.load(name)
        }

        fn save(&self, name: &SpriteName, _image: &RgbaImage) -> Result<(), AssetError> {
            Err(AssetError::Persist {
                name: name.to_string(),
                reason: "read-only".to_string(),
            })
        }
    }

    fn baker_over(store: Arc<dyn AssetStore>) -> WorldBaker {
        let cache = Arc::new(SpriteCache::new(Arc::clone(&store)));
        WorldBaker::new(Arc::new(BoardCompositor::new(cache)), store)
    }

    fn seeded() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.insert_solid("meadow", 200, 200, [30, 160, 30, 255]);
        store.insert_solid("rocks", 20, 20, [90, 90, 90, 255]);
        store
    }

    #[test]
    fn test_bake_saves_world_sprite() {
        let store = seeded();
        let baker = baker_over(Arc::clone(&store) as Arc<dyn AssetStore>);
        let config = BoardConfig::new(200, 5);

        let sprite = baker.bake("forest", "meadow", Some("rocks"), &config).unwrap();

        assert_eq!(sprite.name.as_str(), "forest-world");
        assert_eq!(sprite.image.dimensions(), (200, 200));
        assert_eq!(sprite.image.get_pixel(5, 5), &Rgba([90, 90, 90, 255]));
        assert_eq!(sprite.image.get_pixel(30, 30), &Rgba([30, 160, 30, 255]));
        assert_eq!(sprite.image.get_pixel(60, 60), &config.grid_rgba());
        assert!(store.contains("forest-world"));
    }

    #[test]
    fn test_baked_world_is_resolvable_as_background() {
        let store = seeded();
        let baker = baker_over(Arc::clone(&store) as Arc<dyn AssetStore>);
        let config = BoardConfig::new(200, 5);
        baker.bake("forest", "meadow", None, &config).unwrap();

        let cache = Arc::new(SpriteCache::new(Arc::clone(&store) as Arc<dyn AssetStore>));
        let world = cache.resolve("forest-world").unwrap();
        assert_eq!(world.image.dimensions(), (200, 200));
    }

    #[test]
    fn test_missing_background_propagates() {
        let baker = baker_over(seeded() as Arc<dyn AssetStore>);
        let err = baker
            .bake("forest", "void", None, &BoardConfig::new(200, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            BakeError::Render(RenderError::MissingBackground { .. })
        ));
    }

    #[test]
    fn test_missing_border_is_an_error() {
        let baker = baker_over(seeded() as Arc<dyn AssetStore>);
        let err = baker
            .bake("forest", "meadow", Some("cliffs"), &BoardConfig::new(200, 5))
            .unwrap_err();
        assert!(matches!(err, BakeError::MissingBorder { name, .. } if name == "cliffs"));
    }

    #[test]
    fn test_baked_world_carries_labels() {
        let store = seeded();
        let baker = baker_over(Arc::clone(&store) as Arc<dyn AssetStore>);
        let config = BoardConfig::new(1000, 5);
        store.insert_solid("meadow", 1000, 1000, [30, 160, 30, 255]);

        let baked = baker.bake("forest", "meadow", None, &config).unwrap();

        let cache = Arc::new(SpriteCache::new(Arc::clone(&store) as Arc<dyn AssetStore>));
        let layout = BoardLayout::empty(&config, SpriteName::parse("meadow").unwrap(), None);
        let unlabelled = BoardCompositor::new(cache)
            .render(&config.with_labels(false), &layout)
            .unwrap();
        assert_ne!(baked.image, unlabelled, "bake must draw cell labels");
    }

    #[test]
    fn test_bake_without_label_font_is_refused() {
        let store = seeded();
        let cache = Arc::new(SpriteCache::new(Arc::clone(&store) as Arc<dyn AssetStore>));
        let compositor = Arc::new(BoardCompositor::new(cache).without_label_font());
        let baker = WorldBaker::new(compositor, Arc::clone(&store) as Arc<dyn AssetStore>);

        let err = baker
            .bake("forest", "meadow", None, &BoardConfig::new(200, 5))
            .unwrap_err();
        assert!(matches!(err, BakeError::MissingLabelFont));
        assert!(!store.contains("forest-world"));
    }

    #[test]
    fn test_write_failure_is_persist_error() {
        let inner = MemoryStore::new();
        inner.insert_solid("meadow", 200, 200, [30, 160, 30, 255]);
        let baker = baker_over(Arc::new(ReadOnlyStore(inner)));

        let err = baker
            .bake("forest", "meadow", None, &BoardConfig::new(200, 5))
            .unwrap_err();
        assert!(matches!(err, BakeError::Persist { name, .. } if name == "forest-world"));
    }

    #[test]
    fn test_invalid_world_name_rejected() {
        let baker = baker_over(seeded() as Arc<dyn AssetStore>);
        let err = baker
            .bake("../oops", "meadow", None, &BoardConfig::new(200, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            BakeError::Render(RenderError::InvalidLayout(_))
        ));
    }
}
