//! Canvas Snake core crate.
//!
//! The simulation (`game`) and drawing (`render`) are plain Rust and run
//! natively under `cargo test`. `web` wires them to the page: a canvas, two
//! text overlays, a `keydown` listener, a fixed-period tick timer and an
//! animation-frame redraw loop.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod game;
pub mod render;
mod web;

pub use config::{ConfigError, GameConfig};
pub use game::{CellRng, Direction, EntropyRng, GameLoop, Segment, Snake, Stats, TickReport};
pub use render::{RenderSink, draw_frame};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Start with a JSON config object; missing keys fall back to defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::start(config)
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn stats_json() -> Result<String, JsValue> {
    web::stats_json()
}
