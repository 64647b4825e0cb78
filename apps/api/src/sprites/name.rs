//! Logical sprite names.
//!
//! Tile identifiers arrive namespaced (`water:deep`) while the asset store is
//! flat (`water_deep.png`). Normalization happens once, at parse time, so every
//! downstream consumer (cache key, store path, logs) sees the same spelling.

use std::fmt;

use crate::sprites::AssetError;

/// Separator used by namespaced tile identifiers.
pub const NAMESPACE_SEPARATOR: char = ':';

/// A validated, normalized sprite name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteName(String);

impl SpriteName {
    /// Validates `raw` and replaces every namespace separator with `_`.
    ///
    /// Accepts ASCII alphanumerics, `_`, `-` and `:`. Anything else (path
    /// separators, dots, whitespace) is rejected so a name can never point
    /// outside the asset directory.
    pub fn parse(raw: &str) -> Result<Self, AssetError> {
        if raw.is_empty() {
            return Err(AssetError::InvalidName {
                name: raw.to_string(),
                reason: "name is empty".to_string(),
            });
        }

        if let Some(bad) = raw.chars().find(|&c| !is_name_char(c)) {
            return Err(AssetError::InvalidName {
                name: raw.to_string(),
                reason: format!("character {bad:?} is not allowed"),
            });
        }

        Ok(SpriteName(raw.replace(NAMESPACE_SEPARATOR, "_")))
    }

    /// Name of the baked background for a world (`<world>-world`).
    pub fn world(world: &str) -> Result<Self, AssetError> {
        SpriteName::parse(&format!("{world}-world"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | NAMESPACE_SEPARATOR)
}

impl fmt::Display for SpriteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
