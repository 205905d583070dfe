//! Loading `<img>` assets into the shared resource cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_events::EventListener;
use robasm_editor_core::{OverlayError, ReadyCallback, ResourceCache, ResourceState, SmolStr};
use web_sys::HtmlImageElement;

use crate::dom::js_message;

pub type SharedImageCache = Rc<RefCell<ResourceCache<HtmlImageElement>>>;

/// Starts image loads for cache misses and reports completions back.
///
/// Ready callbacks run after the cache borrow is released, so they are free
/// to read the cache (e.g. to draw).
pub struct ImageLoader {
    cache: SharedImageCache,
    url_for: Box<dyn Fn(&str) -> String>,
    /// `load` / `error` listeners per image, dropped once the load settles.
    listeners: RefCell<HashMap<SmolStr, [EventListener; 2]>>,
}

impl ImageLoader {
    pub fn new(url_for: impl Fn(&str) -> String + 'static) -> Self {
        Self {
            cache: Rc::new(RefCell::new(ResourceCache::new())),
            url_for: Box::new(url_for),
            listeners: RefCell::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &SharedImageCache {
        &self.cache
    }

    /// Request `names`, starting a load for each one not seen before.
    ///
    /// Returns how many loads were started.
    pub fn load<I, S>(&self, names: I) -> Result<usize, OverlayError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut listeners = self.listeners.borrow_mut();
        {
            // A listener can't drop itself while running, so settled ones
            // are pruned here instead.
            let cache = self.cache.borrow();
            listeners.retain(|name, _| cache.state(name) == ResourceState::Loading);
        }

        let to_load = self.cache.borrow_mut().request(names);

        for name in &to_load {
            let image = HtmlImageElement::new().map_err(|err| OverlayError::Js(js_message(&err)))?;

            let on_load = {
                let cache = self.cache.clone();
                let name = name.clone();
                let loaded = image.clone();
                EventListener::once(&image, "load", move |_event| {
                    let ready = cache.borrow_mut().mark_loaded(&name, loaded);
                    run_ready(ready);
                })
            };
            let on_error = {
                let cache = self.cache.clone();
                let name = name.clone();
                EventListener::once(&image, "error", move |_event| {
                    let ready = cache.borrow_mut().mark_failed(&name);
                    run_ready(ready);
                })
            };
            listeners.insert(name.clone(), [on_load, on_error]);

            let url = (self.url_for)(name);
            tracing::trace!(%name, %url, "loading image");
            image.set_src(&url);
        }

        Ok(to_load.len())
    }

    /// Run `callback` once every requested image has settled, immediately if
    /// that is already the case.
    pub fn on_ready(&self, callback: impl FnOnce() + 'static) {
        let immediate = self.cache.borrow_mut().on_ready(Box::new(callback));
        if let Some(callback) = immediate {
            callback();
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cache.borrow().is_ready()
    }

    /// Images whose listeners are still attached.
    pub fn in_flight(&self) -> usize {
        self.listeners.borrow().len()
    }
}

fn run_ready(callbacks: Vec<ReadyCallback>) {
    for callback in callbacks {
        callback();
    }
}
