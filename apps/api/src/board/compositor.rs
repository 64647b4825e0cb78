//! Layered board compositing.
//!
//! Layer order, each drawn over the previous one:
//! 1. background sprite at (0, 0), clipped to the canvas (fatal if missing)
//! 2. optional border sprite at (0, 0) (skipped if missing)
//! 3. per cell, row-major: grid fill, 2px border stroke, tile sprite (skipped
//!    if missing), label
//!
//! Sprites are alpha-composited onto the canvas; layers themselves are always
//! fully opaque.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ab_glyph::{FontArc, PxScale};
use image::{imageops, ImageFormat, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::{debug, info, warn};

use crate::board::geometry::{cell_rect, label_text, CellRect};
use crate::board::{BoardConfig, BoardLayout, RenderError};
use crate::sprites::{Sprite, SpriteCache};

/// Width of the cell border stroke, centred on the cell edge.
pub const STROKE_WIDTH: u32 = 2;

/// DejaVu Sans Mono (Bitstream Vera license, see `assets/`), used for labels
/// unless another font is configured.
pub const DEFAULT_LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

pub struct BoardCompositor {
    cache: Arc<SpriteCache>,
    label_font: Option<FontArc>,
    warned_missing_font: AtomicBool,
}

impl BoardCompositor {
    /// Compositor drawing labels with the bundled font.
    pub fn new(cache: Arc<SpriteCache>) -> Self {
        let label_font = FontArc::try_from_slice(DEFAULT_LABEL_FONT)
            .map_err(|e| warn!("Bundled label font failed to parse: {e}"))
            .ok();
        Self {
            cache,
            label_font,
            warned_missing_font: AtomicBool::new(false),
        }
    }

    pub fn with_label_font(mut self, font: FontArc) -> Self {
        self.label_font = Some(font);
        self
    }

    pub fn without_label_font(mut self) -> Self {
        self.label_font = None;
        self
    }

    pub fn has_label_font(&self) -> bool {
        self.label_font.is_some()
    }

    pub fn cache(&self) -> &Arc<SpriteCache> {
        &self.cache
    }

    /// Renders `layout` onto a fresh `canvas_size`² canvas.
    ///
    /// Only a missing or undecodable background aborts the render. Border and
    /// tile sprites that fail to resolve are logged and left out.
    pub fn render(
        &self,
        config: &BoardConfig,
        layout: &BoardLayout,
    ) -> Result<RgbaImage, RenderError> {
        config.validate().map_err(RenderError::InvalidLayout)?;

        let n = config.tile_count as usize;
        if layout.tiles.len() != n || layout.tiles.iter().any(|row| row.len() != n) {
            return Err(RenderError::InvalidLayout(format!(
                "tile grid does not match the configured {n}x{n} board"
            )));
        }

        info!("Drawing board with background {}", layout.background);

        let background = self
            .cache
            .resolve_name(&layout.background)
            .map_err(|source| RenderError::MissingBackground {
                name: layout.background.to_string(),
                source,
            })?;

        let mut canvas = RgbaImage::new(config.canvas_size, config.canvas_size);
        place(&mut canvas, &background, (0, 0));

        if let Some(border) = &layout.border {
            match self.cache.resolve_name(border) {
                Ok(sprite) => place(&mut canvas, &sprite, (0, 0)),
                Err(e) => warn!("Skipping border {border}: {e}"),
            }
        }

        let font = if config.draw_labels {
            self.label_font()
        } else {
            None
        };

        for row in 0..config.tile_count {
            for col in 0..config.tile_count {
                let rect = cell_rect(config, row, col);
                draw_cell(&mut canvas, config, &rect);

                if let Some(name) = layout.tile(row, col) {
                    debug!(
                        "Tile at {row} {col} is {name}, drawn at {:?}",
                        rect.sprite_origin()
                    );
                    match self.cache.resolve_name(name) {
                        Ok(sprite) => place(&mut canvas, &sprite, rect.sprite_origin()),
                        Err(e) => warn!("Skipping tile {name} at {row} {col}: {e}"),
                    }
                }

                if let (Some(font), Some(text)) = (font, label_text(config, row, col)) {
                    draw_label(&mut canvas, config, font, &rect, &text);
                }
            }
        }

        Ok(canvas)
    }

    fn label_font(&self) -> Option<&FontArc> {
        if self.label_font.is_none() && !self.warned_missing_font.swap(true, Ordering::Relaxed) {
            warn!("Cell labels are enabled but no label font is loaded; labels will be skipped");
        }
        self.label_font.as_ref()
    }
}

/// Encodes a rendered board as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn place(canvas: &mut RgbaImage, sprite: &Sprite, (x, y): (i32, i32)) {
    imageops::overlay(canvas, &sprite.image, i64::from(x), i64::from(y));
}

fn draw_cell(canvas: &mut RgbaImage, config: &BoardConfig, rect: &CellRect) {
    let (ix, iy, iw, ih) = rect.interior();
    if iw > 0 && ih > 0 {
        draw_filled_rect_mut(canvas, Rect::at(ix, iy).of_size(iw, ih), config.grid_rgba());
    }

    let half = (STROKE_WIDTH / 2) as i32;
    let (x, y) = (rect.x, rect.y);
    let (w, h) = (rect.width as i32, rect.height as i32);
    let strokes = [
        Rect::at(x, y - half).of_size(rect.width, STROKE_WIDTH),
        Rect::at(x, y + h - half).of_size(rect.width, STROKE_WIDTH),
        Rect::at(x - half, y).of_size(STROKE_WIDTH, rect.height),
        Rect::at(x + w - half, y).of_size(STROKE_WIDTH, rect.height),
    ];
    for stroke in strokes {
        draw_filled_rect_mut(canvas, stroke, config.grid_border_rgba());
    }
}

fn draw_label(
    canvas: &mut RgbaImage,
    config: &BoardConfig,
    font: &FontArc,
    rect: &CellRect,
    text: &str,
) {
    let scale = PxScale::from(config.label_size);
    let (_, text_height) = text_size(scale, font, text);
    let (x, bottom) = rect.label_anchor;
    draw_text_mut(
        canvas,
        config.label_rgba(),
        x,
        bottom - text_height as i32,
        scale,
        font,
        text,
    );
}
