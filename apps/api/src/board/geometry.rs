//! Layout-to-pixel geometry. Pure functions of [`BoardConfig`]; identical
//! inputs always give identical rectangles.
//!
//! Conventions:
//! - Cell (row, col) has its top-left corner at
//!   `(margin + col * tile_size, margin + row * tile_size)`.
//! - Labels are `alphabet[row]` followed by the one-based column number, so
//!   (1, 2) is `B3`.
//! - The label anchor is the bottom-left corner of the label text, inset
//!   [`LABEL_INSET`] pixels right of the cell's left edge and up from its
//!   bottom edge, which keeps glyphs clear of the 2px border stroke.

use crate::board::BoardConfig;

/// Label inset from the cell edges, in pixels.
pub const LABEL_INSET: i32 = 20;

/// Pixel placement of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Bottom-left corner of the label text.
    pub label_anchor: (i32, i32),
}

impl CellRect {
    /// Fill area: the cell without its top and left border pixel.
    pub fn interior(&self) -> (i32, i32, u32, u32) {
        (
            self.x + 1,
            self.y + 1,
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        )
    }

    /// Where a tile sprite's top-left pixel lands.
    pub fn sprite_origin(&self) -> (i32, i32) {
        (self.x + 1, self.y + 1)
    }
}

/// Pixel rectangle and label anchor for (`row`, `col`).
///
/// Coordinates saturate at `i32::MAX`; [`BoardConfig::validate`] rejects any
/// config where that could happen for an on-board cell.
pub fn cell_rect(config: &BoardConfig, row: u32, col: u32) -> CellRect {
    let tile = config.tile_size();
    let x = offset(config.margin, col, tile);
    let y = offset(config.margin, row, tile);
    let bottom = y
        .saturating_add(i32::try_from(tile).unwrap_or(i32::MAX))
        .saturating_sub(1);

    CellRect {
        x,
        y,
        width: tile,
        height: tile,
        label_anchor: (
            x.saturating_add(LABEL_INSET),
            bottom.saturating_sub(LABEL_INSET),
        ),
    }
}

fn offset(margin: u32, index: u32, tile: u32) -> i32 {
    let px = i64::from(margin) + i64::from(index) * i64::from(tile);
    i32::try_from(px).unwrap_or(i32::MAX)
}

/// Label for (`row`, `col`), or `None` if the alphabet has no entry for `row`.
pub fn label_text(config: &BoardConfig, row: u32, col: u32) -> Option<String> {
    config
        .label_alphabet
        .get(row as usize)
        .map(|prefix| format!("{prefix}{}", col + 1))
}
