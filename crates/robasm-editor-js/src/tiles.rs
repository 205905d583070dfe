use robasm_editor_browser::{TileMap, TileView, TileViewConfig, Viewport};
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::{JsCell, JsTileData, JsViewport};

/// Tile map canvas with hover highlighting.
#[wasm_bindgen]
pub struct JsTileView {
    view: TileView,
}

#[wasm_bindgen]
impl JsTileView {
    /// Mount with a config object (`{ canvasId, overlayId, tileWidth, ... }`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsTileView, JsError> {
        let config: TileViewConfig = if config.is_undefined() || config.is_null() {
            TileViewConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid tile view config: {}", e)))?
        };
        let view = TileView::mount(config).map_err(to_js_error)?;
        Ok(Self { view })
    }

    /// Show a server tile view.
    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(&self, view: JsTileData) -> Result<(), JsError> {
        self.view
            .set_view_bytes(view.width, view.height, &view.data)
            .map_err(to_js_error)
    }

    /// Keep a whole world map and show the part under `viewport`.
    #[wasm_bindgen(js_name = setWorld)]
    pub fn set_world(&self, world: JsTileData, viewport: JsViewport) -> Result<(), JsError> {
        let map = TileMap::from_bytes(world.width, world.height, &world.data).map_err(to_js_error)?;
        let viewport = Viewport::new(viewport.x, viewport.y, viewport.width, viewport.height);
        self.view.set_world(map, viewport).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = panUp)]
    pub fn pan_up(&self) -> Result<(), JsError> {
        self.view.pan(Viewport::move_up).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = panDown)]
    pub fn pan_down(&self) -> Result<(), JsError> {
        self.view.pan(Viewport::move_down).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = panLeft)]
    pub fn pan_left(&self) -> Result<(), JsError> {
        self.view.pan(Viewport::move_left).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = panRight)]
    pub fn pan_right(&self) -> Result<(), JsError> {
        self.view.pan(Viewport::move_right).map_err(to_js_error)
    }

    pub fn redraw(&self) {
        self.view.redraw();
    }

    #[wasm_bindgen(getter, js_name = hoveredCell)]
    pub fn hovered_cell(&self) -> Option<JsCell> {
        self.view.hovered().map(|(x, y)| JsCell { x, y })
    }

    #[wasm_bindgen(getter, js_name = imagesReady)]
    pub fn images_ready(&self) -> bool {
        self.view.images_ready()
    }
}
