//! Mount-time configuration for the overlay and the tile view.
//!
//! Both structs deserialize from camelCase JSON (or a JS object through
//! `serde-wasm-bindgen`) with every field optional.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::ConfigError;
use crate::platform::Quirks;
use crate::render::RenderOptions;
use crate::tiles::{HIGHLIGHT_ASSET, TileGeometry};

/// Explicit quirk values that win over detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuirkOverrides {
    pub space_break_hint: Option<bool>,
    pub horizontal_padding_px: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Id of the `<textarea>`.
    pub input_id: SmolStr,
    /// Ids of the backdrop layers that receive highlight markup.
    pub backdrop_ids: Vec<SmolStr>,
    pub class_prefix: Option<SmolStr>,
    pub quirks: Option<QuirkOverrides>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            input_id: SmolStr::new_static("code"),
            backdrop_ids: vec![
                SmolStr::new_static("highlights"),
                SmolStr::new_static("highlights_text"),
            ],
            class_prefix: None,
            quirks: None,
        }
    }
}

impl OverlayConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_id.trim().is_empty() {
            return Err(ConfigError::EmptyInputId);
        }
        if self.backdrop_ids.is_empty() {
            return Err(ConfigError::NoBackdrops);
        }

        let mut seen = HashSet::new();
        for id in std::iter::once(&self.input_id).chain(&self.backdrop_ids) {
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::DuplicateId { id: id.to_string() });
            }
        }

        if let Some(prefix) = &self.class_prefix {
            let valid = prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ConfigError::InvalidClassPrefix {
                    prefix: prefix.to_string(),
                });
            }
        }

        if let Some(px) = self.quirks.and_then(|q| q.horizontal_padding_px) {
            check_length("quirks.horizontalPaddingPx", px)?;
        }
        Ok(())
    }

    /// Layer configured overrides on top of detected quirks.
    pub fn resolve_quirks(&self, detected: Quirks) -> Quirks {
        let Some(overrides) = self.quirks else {
            return detected;
        };
        Quirks {
            space_break_hint: overrides
                .space_break_hint
                .unwrap_or(detected.space_break_hint),
            horizontal_padding_px: overrides
                .horizontal_padding_px
                .unwrap_or(detected.horizontal_padding_px),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            space_break_hint: false,
            class_prefix: self.class_prefix.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileViewConfig {
    /// Canvas the map is drawn on.
    pub canvas_id: SmolStr,
    /// Canvas stacked on top for the hover sprite.
    pub overlay_id: SmolStr,
    pub tile_width: f64,
    pub tile_height: f64,
    pub highlight_asset: SmolStr,
    /// Prefix joined to asset names to form image URLs, e.g. `assets/`.
    pub asset_base: SmolStr,
    /// Suffix joined to asset names, e.g. `.png`.
    pub asset_extension: SmolStr,
}

impl Default for TileViewConfig {
    fn default() -> Self {
        Self {
            canvas_id: SmolStr::new_static("map"),
            overlay_id: SmolStr::new_static("map_overlay"),
            tile_width: 32.0,
            tile_height: 32.0,
            highlight_asset: SmolStr::new_static(HIGHLIGHT_ASSET),
            asset_base: SmolStr::new_static("img/"),
            asset_extension: SmolStr::new_static(".png"),
        }
    }
}

impl TileViewConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_id == self.overlay_id {
            return Err(ConfigError::DuplicateId {
                id: self.canvas_id.to_string(),
            });
        }
        check_length("tileWidth", self.tile_width)?;
        check_length("tileHeight", self.tile_height)?;
        Ok(())
    }

    pub fn geometry(&self) -> TileGeometry {
        TileGeometry::new(self.tile_width, self.tile_height)
    }

    /// Image URL for an asset name.
    pub fn asset_url(&self, name: &str) -> String {
        format!("{}{}{}", self.asset_base, name, self.asset_extension)
    }
}

fn check_length(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLength { field, value })
    }
}
