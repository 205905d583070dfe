//! Overlay binding.

use robasm_editor_browser::{MountedOverlay, OverlayConfig, render_highlights};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// Highlight overlay mounted over a textarea and its backdrops.
#[wasm_bindgen]
pub struct JsOverlay {
    mounted: Option<MountedOverlay>,
}

#[wasm_bindgen]
impl JsOverlay {
    /// Mount with a config object (`{ inputId, backdropIds, classPrefix, quirks }`).
    /// `undefined` uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsOverlay, JsError> {
        let config: OverlayConfig = if config.is_undefined() || config.is_null() {
            OverlayConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid overlay config: {}", e)))?
        };
        let mounted = MountedOverlay::mount(&config).map_err(to_js_error)?;
        Ok(Self {
            mounted: Some(mounted),
        })
    }

    /// Re-render from the textarea's current value.
    pub fn refresh(&self) {
        if let Some(mounted) = &self.mounted {
            mounted.refresh();
        }
    }

    /// Detach the event listeners. The backdrops keep their last content.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }

    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }
}

/// Render robot assembly source to highlight markup.
#[wasm_bindgen(js_name = renderHighlights)]
pub fn render_highlights_js(source: &str) -> String {
    render_highlights(source)
}
