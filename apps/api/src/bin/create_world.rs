//! Interactive world baker: asks for a world name and a background/border
//! sprite pair, then saves the rendered `<world>-world.png` into the asset
//! directory.

use anyhow::{Context, Result};
use dialoguer::Input;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use board_api::board::WorldBaker;
use board_api::config::Config;
use board_api::sprites::DirAssetStore;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("board_api={},create_world={}", &config.rust_log, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let world: String = Input::new()
        .with_prompt("World name")
        .interact_text()
        .context("Failed to read world name")?;
    let background: String = Input::new()
        .with_prompt("Background sprite name")
        .interact_text()
        .context("Failed to read background sprite name")?;
    let border: String = Input::new()
        .with_prompt("Border sprite name (empty for none)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read border sprite name")?;
    let border = Some(border.trim()).filter(|b| !b.is_empty());

    let (store, compositor) = board_api::build_compositor(&config)?;
    let baker = WorldBaker::new(compositor, store);

    let sprite = baker
        .bake(world.trim(), background.trim(), border, &config.board)
        .with_context(|| format!("Failed to bake world {world}"))?;

    let path = DirAssetStore::new(&config.asset_dir).path_for(&sprite.name);
    info!("World {} written to {}", sprite.name, path.display());
    println!("{}", path.display());
    Ok(())
}
