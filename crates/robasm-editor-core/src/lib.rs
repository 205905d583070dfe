//! robasm-editor-core: Pure Rust logic for the robot assembly code editor.
//!
//! This crate provides:
//! - `tokenize` / `render_highlights` - single-pass syntax highlighting to HTML
//! - `HighlightOverlay<D>` - keeps backdrop layers in step with a textarea
//! - `ResourceCache<A>` - load-once asset cache with a ready signal
//! - `TileMap`, `Viewport`, `HoverState` - tile view model, generic over `TileCanvas`
//! - `Envelope` - the JSON message sent to the game server
//!
//! Nothing here touches the DOM; browser bindings live in `robasm-editor-browser`.

pub mod config;
pub mod envelope;
pub mod error;
pub mod overlay;
pub mod platform;
pub mod render;
pub mod resources;
pub mod scroll;
pub mod surface;
pub mod syntax;
pub mod tiles;
pub mod token;

pub use config::{OverlayConfig, QuirkOverrides, TileViewConfig};
pub use envelope::{Envelope, MessageKind, collapse_blank_lines};
pub use error::{ConfigError, EnvelopeError, OverlayError, SocketError, TileMapError};
pub use overlay::HighlightOverlay;
pub use platform::{IOS_TEXTAREA_INSET_PX, Platform, Quirks, format_px, parse_px};
pub use render::{
    HighlightWriter, RenderOptions, render_highlights, render_highlights_with, render_tokens,
};
pub use resources::{ReadyCallback, ResourceCache, ResourceState};
pub use scroll::{ScrollState, ScrollSurface, sync_scroll};
pub use smol_str::SmolStr;
pub use surface::{DisplaySurface, InputSurface};
pub use syntax::{HIGHLIGHT_RULES, HighlightRule, KEYWORDS, MNEMONICS, TokenKind, classify_word};
pub use tiles::{
    HIGHLIGHT_ASSET, HoverState, Tile, TileCanvas, TileGeometry, TileMap, Viewport, draw_hover,
    draw_tiles, tile_asset_name,
};
pub use token::{Token, tokenize};
