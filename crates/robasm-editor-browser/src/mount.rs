//! Mounting the highlight overlay onto page elements.

use std::rc::Rc;

use gloo_events::EventListener;
use robasm_editor_core::{HighlightOverlay, OverlayConfig, OverlayError, ScrollSurface};
use web_sys::{HtmlElement, HtmlTextAreaElement};

use crate::dom::{DomBackdrop, DomTextArea, document, element_by_id};

/// A live overlay. Dropping it removes the event listeners; the backdrops
/// keep their last markup.
pub struct MountedOverlay {
    overlay: Rc<HighlightOverlay<DomBackdrop>>,
    input: DomTextArea,
    _listeners: Vec<EventListener>,
}

impl MountedOverlay {
    /// Resolve the configured elements, apply platform quirks, render the
    /// current text once and start listening for `input` and `scroll`.
    pub fn mount(config: &OverlayConfig) -> Result<Self, OverlayError> {
        config.validate()?;
        let document = document()?;

        let input = DomTextArea::new(element_by_id::<HtmlTextAreaElement>(
            &document,
            &config.input_id,
            "textarea",
        )?);
        let backdrops = config
            .backdrop_ids
            .iter()
            .map(|id| element_by_id::<HtmlElement>(&document, id, "HTML element").map(DomBackdrop::new))
            .collect::<Result<Vec<_>, _>>()?;

        let quirks = config.resolve_quirks(crate::platform::quirks());
        let overlay = Rc::new(HighlightOverlay::new(
            backdrops,
            quirks,
            config.render_options(),
        ));
        overlay.refresh_from(&input);

        let target = input.element().clone();
        let on_input = {
            let overlay = overlay.clone();
            let input = input.clone();
            EventListener::new(&target, "input", move |_event| {
                overlay.on_input(&input.element().value());
            })
        };
        let on_scroll = {
            let overlay = overlay.clone();
            let input = input.clone();
            EventListener::new(&target, "scroll", move |_event| {
                overlay.on_scroll(input.scroll());
            })
        };

        tracing::debug!(input = %config.input_id, "overlay listeners attached");

        Ok(Self {
            overlay,
            input,
            _listeners: vec![on_input, on_scroll],
        })
    }

    /// Re-render from the textarea, e.g. after its value was set from code
    /// (which fires no `input` event).
    pub fn refresh(&self) {
        self.overlay.refresh_from(&self.input);
    }

    pub fn input(&self) -> &DomTextArea {
        &self.input
    }

    pub fn overlay(&self) -> &HighlightOverlay<DomBackdrop> {
        &self.overlay
    }
}

impl Drop for MountedOverlay {
    fn drop(&mut self) {
        tracing::debug!("overlay unmounted");
    }
}
