//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// A tile view as sent by the game server: `width * height` cells of
/// `id, orientation` byte pairs, row-major.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsTileData {
    pub width: usize,
    pub height: usize,
    #[tsify(type = "Uint8Array")]
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
}

/// Window into a larger world map, in cells.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsViewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Cell under the mouse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsCell {
    pub x: usize,
    pub y: usize,
}
