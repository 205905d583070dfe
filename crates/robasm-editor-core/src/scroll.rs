//! Scroll offsets shared between the input and its backdrops.

/// Scroll offsets of a surface, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub top: f64,
    pub left: f64,
}

impl ScrollState {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Anything that has independently settable scroll offsets.
pub trait ScrollSurface {
    fn scroll(&self) -> ScrollState;
    fn set_scroll(&self, scroll: ScrollState);
}

impl<T: ScrollSurface> ScrollSurface for &T {
    fn scroll(&self) -> ScrollState {
        (*self).scroll()
    }

    fn set_scroll(&self, scroll: ScrollState) {
        (*self).set_scroll(scroll)
    }
}

/// Copy `source`'s offsets onto every target.
pub fn sync_scroll<S, T>(source: &S, targets: &[T])
where
    S: ScrollSurface + ?Sized,
    T: ScrollSurface,
{
    let scroll = source.scroll();
    for target in targets {
        target.set_scroll(scroll);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct FakeSurface(Cell<ScrollState>);

    impl ScrollSurface for FakeSurface {
        fn scroll(&self) -> ScrollState {
            self.0.get()
        }

        fn set_scroll(&self, scroll: ScrollState) {
            self.0.set(scroll);
        }
    }

    #[test]
    fn test_sync_scroll_copies_both_offsets() {
        let input = FakeSurface::default();
        input.set_scroll(ScrollState::new(40.0, 5.0));
        let backdrops = [FakeSurface::default(), FakeSurface::default()];

        sync_scroll(&input, &backdrops);

        for backdrop in &backdrops {
            assert_eq!(backdrop.scroll(), ScrollState::new(40.0, 5.0));
        }
    }

    #[test]
    fn test_sync_scroll_resets_to_origin() {
        let input = FakeSurface::default();
        let backdrop = FakeSurface(Cell::new(ScrollState::new(10.0, 10.0)));
        sync_scroll(&input, std::slice::from_ref(&backdrop));
        assert_eq!(backdrop.scroll(), ScrollState::default());
    }
}
