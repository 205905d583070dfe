//! Surface traits between the overlay engine and the host UI.
//!
//! The browser crate implements these over DOM elements; tests implement
//! them over plain cells. Writes are infallible: a surface that can't apply
//! a value drops it, the same way assigning to a detached element does.

use crate::scroll::ScrollSurface;

/// The editable text input the overlay mirrors.
pub trait InputSurface: ScrollSurface {
    /// Full current text content.
    fn text(&self) -> String;
}

/// A backdrop that shows rendered highlight markup.
pub trait DisplaySurface: ScrollSurface {
    /// Replace the surface content with raw HTML.
    fn set_html(&self, html: &str);

    /// Current `(left, right)` padding in pixels.
    fn horizontal_padding(&self) -> (f64, f64);

    fn set_horizontal_padding(&self, left: f64, right: f64);
}

impl<T: InputSurface> InputSurface for &T {
    fn text(&self) -> String {
        (*self).text()
    }
}

impl<T: DisplaySurface> DisplaySurface for &T {
    fn set_html(&self, html: &str) {
        (*self).set_html(html)
    }

    fn horizontal_padding(&self) -> (f64, f64) {
        (*self).horizontal_padding()
    }

    fn set_horizontal_padding(&self, left: f64, right: f64) {
        (*self).set_horizontal_padding(left, right)
    }
}
