//! DOM-backed surfaces for the highlight overlay.

use robasm_editor_core::{
    DisplaySurface, InputSurface, OverlayError, ScrollState, ScrollSurface, format_px, parse_px,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlTextAreaElement};

/// The current page's document.
pub fn document() -> Result<Document, OverlayError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| OverlayError::Js("no document available".to_string()))
}

/// Look up `#id` and cast it to `T`.
///
/// `expected` names the element kind in the error when the cast fails.
pub fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, OverlayError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| OverlayError::MissingElement { id: id.to_string() })?;
    element.dyn_into::<T>().map_err(|_| OverlayError::WrongElement {
        id: id.to_string(),
        expected,
    })
}

/// Best-effort message out of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

fn element_scroll(element: &web_sys::Element) -> ScrollState {
    ScrollState::new(element.scroll_top() as f64, element.scroll_left() as f64)
}

fn set_element_scroll(element: &web_sys::Element, scroll: ScrollState) {
    element.set_scroll_top(scroll.top.round() as i32);
    element.set_scroll_left(scroll.left.round() as i32);
}

/// The `<textarea>` the user types into.
#[derive(Debug, Clone)]
pub struct DomTextArea {
    element: HtmlTextAreaElement,
}

impl DomTextArea {
    pub fn new(element: HtmlTextAreaElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlTextAreaElement {
        &self.element
    }
}

impl ScrollSurface for DomTextArea {
    fn scroll(&self) -> ScrollState {
        element_scroll(&self.element)
    }

    fn set_scroll(&self, scroll: ScrollState) {
        set_element_scroll(&self.element, scroll);
    }
}

impl InputSurface for DomTextArea {
    fn text(&self) -> String {
        self.element.value()
    }
}

/// A layer behind the textarea that shows highlight markup.
#[derive(Debug, Clone)]
pub struct DomBackdrop {
    element: HtmlElement,
}

impl DomBackdrop {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn computed_px(&self, property: &str) -> Option<f64> {
        let style = web_sys::window()?
            .get_computed_style(&self.element)
            .ok()??;
        let value = style.get_property_value(property).ok()?;
        parse_px(&value)
    }
}

impl ScrollSurface for DomBackdrop {
    fn scroll(&self) -> ScrollState {
        element_scroll(&self.element)
    }

    fn set_scroll(&self, scroll: ScrollState) {
        set_element_scroll(&self.element, scroll);
    }
}

impl DisplaySurface for DomBackdrop {
    fn set_html(&self, html: &str) {
        tracing::trace!(id = %self.element.id(), bytes = html.len(), "backdrop updated");
        self.element.set_inner_html(html);
    }

    fn horizontal_padding(&self) -> (f64, f64) {
        (
            self.computed_px("padding-left").unwrap_or(0.0),
            self.computed_px("padding-right").unwrap_or(0.0),
        )
    }

    fn set_horizontal_padding(&self, left: f64, right: f64) {
        let style = self.element.style();
        for (property, value) in [("padding-left", left), ("padding-right", right)] {
            if let Err(err) = style.set_property(property, &format_px(value)) {
                tracing::warn!(property, error = %js_message(&err), "failed to set backdrop padding");
            }
        }
    }
}
