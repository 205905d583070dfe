//! The highlight overlay: re-renders on input, mirrors scroll offsets.
//!
//! The overlay owns its backdrops but holds no text. Every `on_input` call
//! renders from scratch, so the markup is always a function of the latest
//! input alone.

use crate::platform::Quirks;
use crate::render::{RenderOptions, render_highlights_with};
use crate::scroll::ScrollState;
use crate::surface::{DisplaySurface, InputSurface};

pub struct HighlightOverlay<D: DisplaySurface> {
    backdrops: Vec<D>,
    options: RenderOptions,
    /// Padding each backdrop had before the quirk inset, restored on drop.
    /// Empty when no inset was applied.
    original_padding: Vec<(f64, f64)>,
}

impl<D: DisplaySurface> HighlightOverlay<D> {
    /// Mount over `backdrops`, applying the platform quirks once.
    ///
    /// The space-break hint is enabled if either `quirks` or `options` asks
    /// for it. Padding added here is taken off again when the overlay is
    /// dropped or `into_backdrops` is called.
    pub fn new(backdrops: Vec<D>, quirks: Quirks, options: RenderOptions) -> Self {
        let mut original_padding = Vec::new();
        if quirks.horizontal_padding_px != 0.0 {
            original_padding.reserve(backdrops.len());
            for backdrop in &backdrops {
                let (left, right) = backdrop.horizontal_padding();
                original_padding.push((left, right));
                backdrop.set_horizontal_padding(
                    left + quirks.horizontal_padding_px,
                    right + quirks.horizontal_padding_px,
                );
            }
        }

        let options = RenderOptions {
            space_break_hint: options.space_break_hint || quirks.space_break_hint,
            ..options
        };

        tracing::debug!(
            backdrops = backdrops.len(),
            space_break_hint = options.space_break_hint,
            padding_px = quirks.horizontal_padding_px,
            "highlight overlay mounted"
        );

        Self {
            backdrops,
            options,
            original_padding,
        }
    }

    /// Render `raw` and write it into every backdrop.
    pub fn on_input(&self, raw: &str) {
        let html = render_highlights_with(raw, &self.options);
        for backdrop in &self.backdrops {
            backdrop.set_html(&html);
        }
    }

    /// Copy the input's scroll offsets onto every backdrop.
    pub fn on_scroll(&self, scroll: ScrollState) {
        for backdrop in &self.backdrops {
            backdrop.set_scroll(scroll);
        }
    }

    /// Pull both text and scroll from `input`. Used right after mounting.
    pub fn refresh_from<I: InputSurface + ?Sized>(&self, input: &I) {
        self.on_input(&input.text());
        self.on_scroll(input.scroll());
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn backdrops(&self) -> &[D] {
        &self.backdrops
    }

    /// Unmount, handing the backdrops back with their padding restored.
    pub fn into_backdrops(mut self) -> Vec<D> {
        self.restore_padding();
        std::mem::take(&mut self.backdrops)
    }

    fn restore_padding(&mut self) {
        for (backdrop, (left, right)) in self.backdrops.iter().zip(self.original_padding.drain(..)) {
            backdrop.set_horizontal_padding(left, right);
        }
    }
}

impl<D: DisplaySurface> Drop for HighlightOverlay<D> {
    fn drop(&mut self) {
        self.restore_padding();
    }
}
