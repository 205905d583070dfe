use robasm_editor_core::{OverlayError, TileCanvas};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::dom::js_message;

/// A `<canvas>` with its 2d context, drawn with loaded images.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, OverlayError> {
        let context = canvas
            .get_context("2d")
            .map_err(|err| OverlayError::Js(js_message(&err)))?
            .ok_or_else(|| OverlayError::Js(format!("canvas #{} has no 2d context", canvas.id())))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OverlayError::Js("2d context has an unexpected type".to_string()))?;
        Ok(Self { canvas, context })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store. Clears the canvas.
    pub fn resize(&self, width: f64, height: f64) {
        self.canvas.set_width(width.ceil().max(0.0) as u32);
        self.canvas.set_height(height.ceil().max(0.0) as u32);
    }
}

impl TileCanvas<HtmlImageElement> for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn draw_image(&mut self, asset: &HtmlImageElement, x: f64, y: f64, width: f64, height: f64) {
        if let Err(err) = self
            .context
            .draw_image_with_html_image_element_and_dw_and_dh(asset, x, y, width, height)
        {
            tracing::warn!(src = %asset.src(), error = %js_message(&err), "drawImage failed");
        }
    }
}
