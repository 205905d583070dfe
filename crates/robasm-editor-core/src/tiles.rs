//! Tile map model, viewport panning, hover tracking and drawing.
//!
//! Drawing goes through the `TileCanvas` trait so the grid and hover logic
//! run without a browser. Cells are stored row-major.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::TileMapError;
use crate::resources::ResourceCache;

/// Asset name of the hover highlight sprite.
pub const HIGHLIGHT_ASSET: &str = "highlight";

/// A single map cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: u8,
    /// Quarter turns, 0-3.
    pub orientation: u8,
}

impl Tile {
    /// Air.
    pub const EMPTY: Tile = Tile {
        id: 0,
        orientation: 0,
    };

    pub fn new(id: u8, orientation: u8) -> Self {
        Self { id, orientation }
    }

    /// Image asset for this tile, `tile<id>_<orientation>`.
    pub fn asset_name(&self) -> String {
        tile_asset_name(*self)
    }
}

pub fn tile_asset_name(tile: Tile) -> String {
    format!("tile{}_{}", tile.id, tile.orientation)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileMap {
    /// A map of empty tiles.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Tile::EMPTY; width * height],
        }
    }

    /// Build from rows of `(id, orientation)` pairs.
    pub fn from_rows(rows: &[Vec<(u8, u8)>]) -> Result<Self, TileMapError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TileMapError::RaggedRows {
                    row: row_idx,
                    len: row.len(),
                    expected: width,
                });
            }
            cells.extend(row.iter().map(|&(id, orientation)| Tile::new(id, orientation)));
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Build from the flat `id, orientation, id, orientation, ...` view
    /// format, row-major.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, TileMapError> {
        if bytes.len() % 2 != 0 {
            return Err(TileMapError::OddLength { len: bytes.len() });
        }
        let cells = bytes.len() / 2;
        if cells != width * height {
            return Err(TileMapError::DimensionMismatch {
                width,
                height,
                cells,
            });
        }
        Ok(Self {
            width,
            height,
            cells: bytes
                .chunks_exact(2)
                .map(|pair| Tile::new(pair[0], pair[1]))
                .collect(),
        })
    }

    /// Encode in the flat view format.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|tile| [tile.id, tile.orientation])
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Returns false if `(x, y)` is outside the map.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Every cell as `(x, y, tile)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i % width, i / width, *tile))
    }

    /// Distinct asset names used by this map, for preloading.
    pub fn asset_names(&self) -> BTreeSet<String> {
        self.cells.iter().map(Tile::asset_name).collect()
    }
}

/// A movable window onto a larger map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn move_up(&mut self) {
        self.y = self.y.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    pub fn move_left(&mut self) {
        self.x = self.x.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    /// Cut this window out of `map`. Cells past the map edge are empty.
    pub fn view(&self, map: &TileMap) -> TileMap {
        let mut view = TileMap::new(self.width, self.height);
        for vy in 0..self.height {
            for vx in 0..self.width {
                if let Some(tile) = map.get(self.x + vx, self.y + vy) {
                    view.set(vx, vy, tile);
                }
            }
        }
        view
    }
}

/// Pixel size of one cell on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileGeometry {
    pub tile_width: f64,
    pub tile_height: f64,
}

impl TileGeometry {
    pub fn new(tile_width: f64, tile_height: f64) -> Self {
        Self {
            tile_width,
            tile_height,
        }
    }

    /// Cell under canvas pixel `(px, py)`, if inside a `columns` x `rows` grid.
    pub fn cell_at(&self, px: f64, py: f64, columns: usize, rows: usize) -> Option<(usize, usize)> {
        if px < 0.0 || py < 0.0 || self.tile_width <= 0.0 || self.tile_height <= 0.0 {
            return None;
        }
        let x = (px / self.tile_width).floor() as usize;
        let y = (py / self.tile_height).floor() as usize;
        (x < columns && y < rows).then_some((x, y))
    }

    /// Top-left pixel of cell `(x, y)`.
    pub fn cell_origin(&self, x: usize, y: usize) -> (f64, f64) {
        (x as f64 * self.tile_width, y as f64 * self.tile_height)
    }

    /// Canvas size needed to show `map` whole.
    pub fn canvas_size(&self, map: &TileMap) -> (f64, f64) {
        self.cell_origin(map.width(), map.height())
    }
}

/// Last known cell under the mouse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    cell: Option<(usize, usize)>,
}

impl HoverState {
    pub fn cell(&self) -> Option<(usize, usize)> {
        self.cell
    }

    /// Recompute from a mouse position. Returns true if the cell changed.
    pub fn on_mouse_move(
        &mut self,
        px: f64,
        py: f64,
        geometry: &TileGeometry,
        columns: usize,
        rows: usize,
    ) -> bool {
        let cell = geometry.cell_at(px, py, columns, rows);
        let changed = cell != self.cell;
        self.cell = cell;
        changed
    }

    /// Returns true if there was a hovered cell.
    pub fn on_mouse_leave(&mut self) -> bool {
        self.cell.take().is_some()
    }
}

/// A 2D drawing surface for tile assets of type `A`.
pub trait TileCanvas<A> {
    fn clear(&mut self);
    fn draw_image(&mut self, asset: &A, x: f64, y: f64, width: f64, height: f64);
}

/// Clear `canvas` and draw every cell of `map` whose asset is loaded.
///
/// Returns how many cells were drawn.
pub fn draw_tiles<A, C>(
    map: &TileMap,
    geometry: &TileGeometry,
    cache: &ResourceCache<A>,
    canvas: &mut C,
) -> usize
where
    C: TileCanvas<A> + ?Sized,
{
    canvas.clear();
    let mut drawn = 0;
    for (x, y, tile) in map.iter() {
        let name = tile.asset_name();
        let Some(asset) = cache.get(&name) else {
            tracing::trace!(x, y, asset = %name, "tile asset not loaded, skipping");
            continue;
        };
        let (px, py) = geometry.cell_origin(x, y);
        canvas.draw_image(asset, px, py, geometry.tile_width, geometry.tile_height);
        drawn += 1;
    }
    drawn
}

/// Clear the overlay and draw the `sprite` asset over the hovered cell.
///
/// Returns true if the sprite was drawn.
pub fn draw_hover<A, C>(
    hover: &HoverState,
    geometry: &TileGeometry,
    cache: &ResourceCache<A>,
    sprite: &str,
    canvas: &mut C,
) -> bool
where
    C: TileCanvas<A> + ?Sized,
{
    canvas.clear();
    let (Some((x, y)), Some(asset)) = (hover.cell(), cache.get(sprite)) else {
        return false;
    };
    let (px, py) = geometry.cell_origin(x, y);
    canvas.draw_image(asset, px, py, geometry.tile_width, geometry.tile_height);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCanvas {
        clears: usize,
        draws: Vec<(&'static str, f64, f64, f64, f64)>,
    }

    impl TileCanvas<&'static str> for RecordingCanvas {
        fn clear(&mut self) {
            self.clears += 1;
            self.draws.clear();
        }

        fn draw_image(&mut self, asset: &&'static str, x: f64, y: f64, w: f64, h: f64) {
            self.draws.push((*asset, x, y, w, h));
        }
    }

    fn loaded_cache(names: &[&'static str]) -> ResourceCache<&'static str> {
        let mut cache = ResourceCache::new();
        cache.request(names.iter().copied());
        for name in names {
            for cb in cache.mark_loaded(name, *name) {
                cb();
            }
        }
        cache
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(Tile::new(3, 1).asset_name(), "tile3_1");
        assert_eq!(tile_asset_name(Tile::EMPTY), "tile0_0");
    }

    #[test]
    fn test_from_rows() {
        let map = TileMap::from_rows(&[vec![(1, 0), (2, 1)], vec![(0, 0), (3, 2)]]).unwrap();
        assert_eq!((map.width(), map.height()), (2, 2));
        assert_eq!(map.get(1, 0), Some(Tile::new(2, 1)));
        assert_eq!(map.get(1, 1), Some(Tile::new(3, 2)));
        assert_eq!(map.get(2, 0), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = TileMap::from_rows(&[vec![(1, 0), (2, 1)], vec![(0, 0)]]).unwrap_err();
        assert!(matches!(
            err,
            TileMapError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_bytes_view_format() {
        let map = TileMap::from_bytes(2, 1, &[1, 0, 2, 3]).unwrap();
        assert_eq!(map.get(0, 0), Some(Tile::new(1, 0)));
        assert_eq!(map.get(1, 0), Some(Tile::new(2, 3)));
        assert_eq!(map.to_bytes(), vec![1, 0, 2, 3]);

        assert!(matches!(
            TileMap::from_bytes(2, 1, &[1, 0, 2]),
            Err(TileMapError::OddLength { len: 3 })
        ));
        assert!(matches!(
            TileMap::from_bytes(2, 2, &[1, 0, 2, 3]),
            Err(TileMapError::DimensionMismatch { cells: 2, .. })
        ));
    }

    #[test]
    fn test_viewport_pans_and_clips() {
        let mut map = TileMap::new(4, 4);
        map.set(3, 3, Tile::new(2, 0));
        map.set(0, 0, Tile::new(1, 0));

        let mut viewport = Viewport::new(0, 0, 2, 2);
        viewport.move_up();
        viewport.move_left();
        assert_eq!((viewport.x, viewport.y), (0, 0));
        assert_eq!(viewport.view(&map).get(0, 0), Some(Tile::new(1, 0)));

        viewport.move_right();
        viewport.move_right();
        viewport.move_right();
        viewport.move_down();
        viewport.move_down();
        viewport.move_down();
        let view = viewport.view(&map);
        assert_eq!(view.get(0, 0), Some(Tile::new(2, 0)));
        // past the right/bottom edge
        assert_eq!(view.get(1, 1), Some(Tile::EMPTY));
    }

    #[test]
    fn test_hover_tracking() {
        let geometry = TileGeometry::new(32.0, 32.0);
        let mut hover = HoverState::default();

        assert!(hover.on_mouse_move(40.0, 70.0, &geometry, 10, 10));
        assert_eq!(hover.cell(), Some((1, 2)));
        assert!(!hover.on_mouse_move(45.0, 66.0, &geometry, 10, 10));

        assert!(hover.on_mouse_move(400.0, 10.0, &geometry, 10, 10));
        assert_eq!(hover.cell(), None);

        hover.on_mouse_move(0.0, 0.0, &geometry, 10, 10);
        assert!(hover.on_mouse_leave());
        assert_eq!(hover.cell(), None);
        assert!(!hover.on_mouse_leave());
    }

    #[test]
    fn test_draw_tiles_skips_unloaded_assets() {
        let map = TileMap::from_rows(&[vec![(1, 0), (2, 0)]]).unwrap();
        let cache = loaded_cache(&["tile1_0"]);
        let mut canvas = RecordingCanvas::default();

        let drawn = draw_tiles(&map, &TileGeometry::new(16.0, 16.0), &cache, &mut canvas);
        assert_eq!(drawn, 1);
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.draws, vec![("tile1_0", 0.0, 0.0, 16.0, 16.0)]);
    }

    #[test]
    fn test_draw_hover() {
        let geometry = TileGeometry::new(10.0, 20.0);
        let cache = loaded_cache(&[HIGHLIGHT_ASSET]);
        let mut canvas = RecordingCanvas::default();
        let mut hover = HoverState::default();

        assert!(!draw_hover(&hover, &geometry, &cache, HIGHLIGHT_ASSET, &mut canvas));
        assert!(canvas.draws.is_empty());

        hover.on_mouse_move(25.0, 45.0, &geometry, 5, 5);
        assert!(draw_hover(&hover, &geometry, &cache, HIGHLIGHT_ASSET, &mut canvas));
        assert_eq!(canvas.draws, vec![(HIGHLIGHT_ASSET, 20.0, 40.0, 10.0, 20.0)]);

        hover.on_mouse_leave();
        draw_hover(&hover, &geometry, &cache, HIGHLIGHT_ASSET, &mut canvas);
        assert!(canvas.draws.is_empty());
    }

    #[test]
    fn test_asset_names_for_preload() {
        let map = TileMap::from_rows(&[vec![(1, 0), (1, 0), (2, 3)]]).unwrap();
        let names: Vec<String> = map.asset_names().into_iter().collect();
        assert_eq!(names, vec!["tile1_0".to_string(), "tile2_3".to_string()]);
    }
}
