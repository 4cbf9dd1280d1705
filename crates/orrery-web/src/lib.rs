//! Orrery Web - browser and desktop frontends
//!
//! In the browser the scene renders into the page's canvas and drives the
//! page's own tooltip, panels and nav links. On the desktop the same scene
//! runs in a window with an egui overlay in place of the page.

pub mod app;
mod dom;

use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn start() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build(),
    );

    let config = dom::inline_config();
    if let Err(e) = app::run(config) {
        tracing::error!(error = %e, "Orrery failed to start");
    }
}
