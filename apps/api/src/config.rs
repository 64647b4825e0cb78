use std::path::PathBuf;
use std::str::FromStr;

use ab_glyph::FontArc;
use anyhow::{anyhow, Context, Result};

use crate::board::config::{
    DEFAULT_CANVAS_SIZE, DEFAULT_GRID_BORDER_COLOR, DEFAULT_GRID_COLOR, DEFAULT_LABEL_ALPHABET,
    DEFAULT_LABEL_COLOR, DEFAULT_LABEL_SIZE, DEFAULT_TILE_COUNT,
};
use crate::board::{parse_hex_color, BoardConfig};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Flat directory of `<name>.png` sprites.
    pub asset_dir: PathBuf,
    pub label_font_path: Option<PathBuf>,
    pub board: BoardConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let canvas_size: u32 = parse_or(&lookup, "BOARD_CANVAS_SIZE", DEFAULT_CANVAS_SIZE)?;
        let tile_count: u32 = parse_or(&lookup, "BOARD_TILE_COUNT", DEFAULT_TILE_COUNT)?;

        let mut board = BoardConfig::new(canvas_size, tile_count);
        board.margin = parse_or(&lookup, "BOARD_MARGIN", canvas_size / 4)?;
        board.grid_color = color_or(&lookup, "BOARD_GRID_COLOR", DEFAULT_GRID_COLOR)?;
        board.grid_border_color =
            color_or(&lookup, "BOARD_GRID_BORDER_COLOR", DEFAULT_GRID_BORDER_COLOR)?;
        board.label_color = color_or(&lookup, "BOARD_LABEL_COLOR", DEFAULT_LABEL_COLOR)?;
        board.label_alphabet = lookup("BOARD_LABEL_ALPHABET")
            .unwrap_or_else(|| DEFAULT_LABEL_ALPHABET.to_string())
            .chars()
            .map(String::from)
            .collect();
        board.draw_labels = parse_or(&lookup, "BOARD_DRAW_LABELS", true)?;
        board.label_size = parse_or(&lookup, "BOARD_LABEL_SIZE", DEFAULT_LABEL_SIZE)?;
        board
            .validate()
            .map_err(|e| anyhow!("Invalid board configuration: {e}"))?;

        Ok(Config {
            port: parse_or(&lookup, "PORT", 5050)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            asset_dir: lookup("ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("sprites")),
            label_font_path: lookup("LABEL_FONT_PATH").map(PathBuf::from),
            board,
        })
    }

    /// Reads the label font, if one is configured.
    pub fn load_label_font(&self) -> Result<Option<FontArc>> {
        let Some(path) = &self.label_font_path else {
            return Ok(None);
        };
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read label font {}", path.display()))?;
        let font = FontArc::try_from_vec(bytes)
            .with_context(|| format!("Label font {} is not a valid font", path.display()))?;
        Ok(Some(font))
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value {raw:?}")),
        None => Ok(default),
    }
}

fn color_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<[u8; 4]> {
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse_hex_color(&raw).map_err(|e| anyhow!("{key}: {e}"))
}
