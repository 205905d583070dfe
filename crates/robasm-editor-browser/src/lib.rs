//! Browser DOM layer for the robasm code editor.
//!
//! This crate implements the core surface traits over real elements and
//! wires them to browser events. It assumes a `wasm32-unknown-unknown`
//! target environment.
//!
//! # Architecture
//!
//! - `dom`: element lookup, textarea and backdrop surfaces
//! - `mount`: the highlight overlay bound to `input` / `scroll` events
//! - `images`: `<img>` loading into the core resource cache
//! - `canvas` / `tile_view`: tile map drawing and hover highlighting
//! - `socket`: WebSocket client that uploads program text
//! - `platform`: cached browser/OS detection
//!
//! # Re-exports
//!
//! This crate re-exports `robasm-editor-core` for convenience, so consumers
//! only need to depend on `robasm-editor-browser`.

// Re-export core crate
pub use robasm_editor_core;
pub use robasm_editor_core::*;

pub mod canvas;
pub mod dom;
pub mod images;
pub mod mount;
pub mod platform;
pub mod socket;
pub mod tile_view;

pub use canvas::CanvasSurface;
pub use dom::{DomBackdrop, DomTextArea};
pub use images::{ImageLoader, SharedImageCache};
pub use mount::MountedOverlay;
pub use platform::{platform, quirks};
pub use socket::{CodeSocket, ConvertButton};
pub use tile_view::TileView;
