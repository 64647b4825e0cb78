//! Per-request board description and validation of the wire payload.

use serde::Deserialize;

use crate::board::{BoardConfig, RenderError};
use crate::sprites::SpriteName;

/// A board to render. Built fresh per request; `tiles` is row-major and always
/// `tile_count × tile_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub background: SpriteName,
    pub border: Option<SpriteName>,
    pub tiles: Vec<Vec<Option<SpriteName>>>,
}

impl BoardLayout {
    /// Checks the grid is square and matches `config.tile_count`.
    pub fn new(
        config: &BoardConfig,
        background: SpriteName,
        border: Option<SpriteName>,
        tiles: Vec<Vec<Option<SpriteName>>>,
    ) -> Result<Self, RenderError> {
        let expected = config.tile_count as usize;
        if tiles.len() != expected {
            return Err(RenderError::InvalidLayout(format!(
                "expected {expected} rows of tiles, got {}",
                tiles.len()
            )));
        }
        if let Some((row, cells)) = tiles.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(RenderError::InvalidLayout(format!(
                "row {row} has {} tiles, expected {expected}",
                cells.len()
            )));
        }

        Ok(Self {
            background,
            border,
            tiles,
        })
    }

    /// A layout with no tiles at all.
    pub fn empty(
        config: &BoardConfig,
        background: SpriteName,
        border: Option<SpriteName>,
    ) -> Self {
        let n = config.tile_count as usize;
        Self {
            background,
            border,
            tiles: vec![vec![None; n]; n],
        }
    }

    pub fn tile(&self, row: u32, col: u32) -> Option<&SpriteName> {
        self.tiles
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .and_then(Option::as_ref)
    }
}

/// JSON body of `POST /render`.
///
/// `world` names a baked world; its background sprite is `<world>-world`.
/// `null` tiles are empty cells.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    pub world: String,
    #[serde(default)]
    pub border: Option<String>,
    pub tiles: Vec<Vec<Option<String>>>,
}

impl RenderRequest {
    pub fn into_layout(self, config: &BoardConfig) -> Result<BoardLayout, RenderError> {
        let background = SpriteName::world(&self.world).map_err(invalid)?;
        let border = self
            .border
            .as_deref()
            .map(SpriteName::parse)
            .transpose()
            .map_err(invalid)?;

        let tiles = self
            .tiles
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.as_deref().map(SpriteName::parse).transpose())
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        BoardLayout::new(config, background, border, tiles)
    }
}

fn invalid(e: impl std::fmt::Display) -> RenderError {
    RenderError::InvalidLayout(e.to_string())
}
