//! Render geometry and palette for a board.

use image::Rgba;

pub const DEFAULT_CANVAS_SIZE: u32 = 1000;
pub const DEFAULT_TILE_COUNT: u32 = 5;
pub const DEFAULT_GRID_COLOR: &str = "#e4e4a1";
pub const DEFAULT_GRID_BORDER_COLOR: &str = "#707070";
pub const DEFAULT_LABEL_COLOR: &str = "#000";
pub const DEFAULT_LABEL_ALPHABET: &str = "ABCDE";
pub const DEFAULT_LABEL_SIZE: f32 = 16.0;

/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIZE: u32 = 8192;

/// Board render parameters. Immutable once built; shared by every render.
///
/// `margin` is the pixel offset of the grid's top-left corner and defaults to
/// a quarter of the canvas. Tile size is not configurable: it is always
/// `canvas_size / tile_count / 2` (see [`BoardConfig::tile_size`]).
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub canvas_size: u32,
    pub margin: u32,
    pub tile_count: u32,
    pub grid_color: [u8; 4],
    pub grid_border_color: [u8; 4],
    pub label_color: [u8; 4],
    /// Row labels, indexed by row.
    pub label_alphabet: Vec<String>,
    pub draw_labels: bool,
    /// Label glyph height in pixels.
    pub label_size: f32,
}

impl BoardConfig {
    /// Board with the given canvas and tile count, default palette, labels off.
    pub fn new(canvas_size: u32, tile_count: u32) -> Self {
        Self {
            canvas_size,
            margin: canvas_size / 4,
            tile_count,
            grid_color: hex_or_black(DEFAULT_GRID_COLOR),
            grid_border_color: hex_or_black(DEFAULT_GRID_BORDER_COLOR),
            label_color: hex_or_black(DEFAULT_LABEL_COLOR),
            label_alphabet: DEFAULT_LABEL_ALPHABET.chars().map(String::from).collect(),
            draw_labels: false,
            label_size: DEFAULT_LABEL_SIZE,
        }
    }

    pub fn with_labels(mut self, draw_labels: bool) -> Self {
        self.draw_labels = draw_labels;
        self
    }

    /// Side length of one cell in pixels. The grid deliberately uses half the
    /// available subdivision of the canvas.
    pub fn tile_size(&self) -> u32 {
        if self.tile_count == 0 {
            return 0;
        }
        self.canvas_size / self.tile_count / 2
    }

    pub fn grid_rgba(&self) -> Rgba<u8> {
        Rgba(self.grid_color)
    }

    pub fn grid_border_rgba(&self) -> Rgba<u8> {
        Rgba(self.grid_border_color)
    }

    pub fn label_rgba(&self) -> Rgba<u8> {
        Rgba(self.label_color)
    }

    /// Checks the invariants the compositor relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.canvas_size == 0 {
            return Err("canvas size must be positive".to_string());
        }
        if self.canvas_size > MAX_CANVAS_SIZE {
            return Err(format!(
                "canvas size {} exceeds the maximum of {MAX_CANVAS_SIZE}px",
                self.canvas_size
            ));
        }
        if self.tile_count == 0 {
            return Err("tile count must be positive".to_string());
        }
        if self.tile_size() < 2 {
            return Err(format!(
                "canvas of {}px is too small for {} tiles",
                self.canvas_size, self.tile_count
            ));
        }
        let grid_end = self
            .tile_count
            .checked_mul(self.tile_size())
            .and_then(|span| span.checked_add(self.margin))
            .filter(|&end| i32::try_from(end).is_ok());
        if grid_end.is_none() {
            return Err(format!(
                "margin {} puts the grid outside addressable pixel space",
                self.margin
            ));
        }
        if self.draw_labels && self.label_alphabet.len() < self.tile_count as usize {
            return Err(format!(
                "label alphabet has {} entries but the board has {} rows",
                self.label_alphabet.len(),
                self.tile_count
            ));
        }
        if self.label_size.is_nan() || self.label_size <= 0.0 {
            return Err("label size must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE, DEFAULT_TILE_COUNT)
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(raw: &str) -> Result<[u8; 4], String> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{raw:?} is not a hex color"));
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|e| format!("{raw:?}: {e}"));

    match hex.len() {
        3 => {
            let mut out = [0, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let doubled: String = [c, c].iter().collect();
                out[i] = channel(&doubled)?;
            }
            Ok(out)
        }
        6 | 8 => {
            let mut out = [0, 0, 0, 255];
            for i in 0..hex.len() / 2 {
                out[i] = channel(&hex[i * 2..i * 2 + 2])?;
            }
            Ok(out)
        }
        _ => Err(format!("{raw:?} must have 3, 6 or 8 hex digits")),
    }
}

fn hex_or_black(raw: &str) -> [u8; 4] {
    parse_hex_color(raw).unwrap_or([0, 0, 0, 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.canvas_size, 1000);
        assert_eq!(config.margin, 250);
        assert_eq!(config.tile_count, 5);
        assert_eq!(config.tile_size(), 100);
        assert_eq!(config.grid_color, [0xe4, 0xe4, 0xa1, 255]);
        assert_eq!(config.grid_border_color, [0x70, 0x70, 0x70, 255]);
        assert_eq!(config.label_color, [0, 0, 0, 255]);
        assert_eq!(config.label_alphabet, vec!["A", "B", "C", "D", "E"]);
        assert!(!config.draw_labels);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_hex_color("#000").unwrap(), [0, 0, 0, 255]);
        assert_eq!(parse_hex_color("#fa0").unwrap(), [0xff, 0xaa, 0x00, 255]);
    }

    #[test]
    fn test_parse_long_hex_with_alpha() {
        assert_eq!(parse_hex_color("707070").unwrap(), [0x70, 0x70, 0x70, 255]);
        assert_eq!(
            parse_hex_color("#11223380").unwrap(),
            [0x11, 0x22, 0x33, 0x80]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hex_color("#12").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_validate_short_alphabet() {
        let mut config = BoardConfig::default();
        config.label_alphabet = vec!["a".to_string(), "b".to_string()];
        assert!(config.validate().is_ok(), "alphabet only matters with labels on");

        let config = config.with_labels(true);
        assert!(config.validate().unwrap_err().contains("alphabet"));
    }

    #[test]
    fn test_validate_rejects_margin_overflow() {
        let mut config = BoardConfig::default();
        config.margin = u32::MAX - 50;
        assert!(config.validate().unwrap_err().contains("margin"));

        config.margin = i32::MAX as u32;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_canvas() {
        let config = BoardConfig::new(MAX_CANVAS_SIZE + 1, 5);
        assert!(config.validate().unwrap_err().contains("maximum"));
        assert!(BoardConfig::new(MAX_CANVAS_SIZE, 5).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_tiles() {
        let config = BoardConfig::new(1000, 0);
        assert_eq!(config.tile_size(), 0);
        assert!(config.validate().is_err());
    }
}
