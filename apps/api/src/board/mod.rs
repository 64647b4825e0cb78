// Board rendering: geometry, layout validation, layered compositing and world
// baking. Rendering is CPU-bound; async callers must go through
// tokio::task::spawn_blocking.

pub mod baker;
pub mod compositor;
pub mod config;
pub mod geometry;
pub mod layout;

use thiserror::Error;

use crate::sprites::AssetError;

pub use baker::{BakeError, WorldBaker};
pub use compositor::{encode_png, BoardCompositor};
pub use config::{parse_hex_color, BoardConfig};
pub use geometry::{cell_rect, label_text, CellRect};
pub use layout::{BoardLayout, RenderRequest};

/// Errors that abort a render. Missing border or tile sprites never get here;
/// they are logged and that layer is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("background sprite {name} unavailable: {source}")]
    MissingBackground {
        name: String,
        #[source]
        source: AssetError,
    },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}
