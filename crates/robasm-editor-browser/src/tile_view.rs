//! The tile map view: a base canvas for tiles and an overlay canvas for the
//! hover highlight.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use robasm_editor_core::{
    HoverState, OverlayError, ResourceCache, SmolStr, TileGeometry, TileMap, TileViewConfig,
    Viewport, draw_hover, draw_tiles,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlImageElement, MouseEvent};

use crate::canvas::CanvasSurface;
use crate::dom::{document, element_by_id};
use crate::images::ImageLoader;

struct ViewState {
    map: TileMap,
    hover: HoverState,
    tiles: CanvasSurface,
    overlay: CanvasSurface,
}

/// Geometry and sprite name shared by the event handlers.
#[derive(Clone)]
struct DrawParams {
    geometry: TileGeometry,
    highlight: SmolStr,
}

pub struct TileView {
    params: DrawParams,
    state: Rc<RefCell<ViewState>>,
    world: RefCell<Option<(TileMap, Viewport)>>,
    images: ImageLoader,
    _listeners: Vec<EventListener>,
}

impl TileView {
    pub fn mount(config: TileViewConfig) -> Result<Self, OverlayError> {
        config.validate()?;
        let document = document()?;

        let tiles = CanvasSurface::new(element_by_id::<HtmlCanvasElement>(
            &document,
            &config.canvas_id,
            "canvas",
        )?)?;
        let overlay = CanvasSurface::new(element_by_id::<HtmlCanvasElement>(
            &document,
            &config.overlay_id,
            "canvas",
        )?)?;

        let params = DrawParams {
            geometry: config.geometry(),
            highlight: config.highlight_asset.clone(),
        };

        let url_config = config.clone();
        let images = ImageLoader::new(move |name| url_config.asset_url(name));
        images.load([params.highlight.as_str()])?;

        // Mouse events land on the overlay, which sits on top.
        let target = overlay.element().clone();
        let state = Rc::new(RefCell::new(ViewState {
            map: TileMap::new(0, 0),
            hover: HoverState::default(),
            tiles,
            overlay,
        }));

        let on_move = {
            let state = state.clone();
            let cache = images.cache().clone();
            let params = params.clone();
            EventListener::new(&target, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut state = state.borrow_mut();
                let ViewState {
                    map, hover, overlay, ..
                } = &mut *state;
                let (px, py) = (event.offset_x() as f64, event.offset_y() as f64);
                if hover.on_mouse_move(px, py, &params.geometry, map.width(), map.height()) {
                    let cache = cache.borrow();
                    draw_hover(hover, &params.geometry, &cache, &params.highlight, overlay);
                }
            })
        };
        let on_leave = {
            let state = state.clone();
            let cache = images.cache().clone();
            let params = params.clone();
            EventListener::new(&target, "mouseleave", move |_event| {
                let mut state = state.borrow_mut();
                let ViewState { hover, overlay, .. } = &mut *state;
                if hover.on_mouse_leave() {
                    let cache = cache.borrow();
                    draw_hover(hover, &params.geometry, &cache, &params.highlight, overlay);
                }
            })
        };

        tracing::debug!(canvas = %config.canvas_id, overlay = %config.overlay_id, "tile view mounted");

        Ok(Self {
            params,
            state,
            world: RefCell::new(None),
            images,
            _listeners: vec![on_move, on_leave],
        })
    }

    /// Replace the displayed map. Both canvases are resized to fit, missing
    /// tile images are requested and the map is drawn once they settle.
    pub fn set_map(&self, map: TileMap) -> Result<(), OverlayError> {
        let names = map.asset_names();
        {
            let mut state = self.state.borrow_mut();
            let (width, height) = self.params.geometry.canvas_size(&map);
            state.tiles.resize(width, height);
            state.overlay.resize(width, height);
            state.map = map;
            state.hover = HoverState::default();
        }

        let started = self.images.load(&names)?;
        tracing::debug!(assets = names.len(), started, "tile map set");

        let state = self.state.clone();
        let cache = self.images.cache().clone();
        let params = self.params.clone();
        self.images.on_ready(move || redraw(&state, &cache, &params));
        Ok(())
    }

    /// Replace the displayed map from the server's flat byte view.
    pub fn set_view_bytes(
        &self,
        width: usize,
        height: usize,
        bytes: &[u8],
    ) -> Result<(), OverlayError> {
        self.set_map(TileMap::from_bytes(width, height, bytes)?)
    }

    /// Keep a larger map and show the window `viewport` selects.
    pub fn set_world(&self, world: TileMap, viewport: Viewport) -> Result<(), OverlayError> {
        let view = viewport.view(&world);
        *self.world.borrow_mut() = Some((world, viewport));
        self.set_map(view)
    }

    /// Move the viewport over the world map, e.g. `tile_view.pan(Viewport::move_up)`.
    ///
    /// Does nothing until `set_world` has been called.
    pub fn pan(&self, step: fn(&mut Viewport)) -> Result<(), OverlayError> {
        let view = {
            let mut world = self.world.borrow_mut();
            let Some((map, viewport)) = world.as_mut() else {
                return Ok(());
            };
            step(viewport);
            viewport.view(map)
        };
        self.set_map(view)
    }

    /// Draw again with whatever images are loaded now.
    pub fn redraw(&self) {
        redraw(&self.state, self.images.cache(), &self.params);
    }

    pub fn hovered(&self) -> Option<(usize, usize)> {
        self.state.borrow().hover.cell()
    }

    pub fn images_ready(&self) -> bool {
        self.images.is_ready()
    }
}

fn redraw(
    state: &RefCell<ViewState>,
    cache: &RefCell<ResourceCache<HtmlImageElement>>,
    params: &DrawParams,
) {
    let mut state = state.borrow_mut();
    let cache = cache.borrow();
    let ViewState {
        map,
        hover,
        tiles,
        overlay,
    } = &mut *state;
    let drawn = draw_tiles(map, &params.geometry, &cache, tiles);
    draw_hover(hover, &params.geometry, &cache, &params.highlight, overlay);
    tracing::trace!(drawn, cells = map.width() * map.height(), "tile map drawn");
}

impl Drop for TileView {
    fn drop(&mut self) {
        tracing::debug!("tile view unmounted");
    }
}
