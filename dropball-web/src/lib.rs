//! Dropball WASM web runtime
//!
//! A sphere drops onto a tilted ground box. Rapier3D simulates the bodies,
//! the scene mirrors them every frame, and the physics debug lines are drawn
//! over the lit, shadowed meshes via WebGPU.

#[cfg(target_arch = "wasm32")]
mod app;
pub mod camera;
pub mod config;
pub mod debug_draw;
pub mod demo;
pub mod input;
pub mod physics;
pub mod scene;
pub mod transform;

pub use config::DemoConfig;
pub use demo::{Demo, TickReport};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point, called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Dropball web runtime initialized");
}

/// Create the demo with default settings on the given canvas.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn create_app(canvas_id: String) -> Result<app::App, JsValue> {
    app::App::new(&canvas_id, DemoConfig::default()).await
}

/// Create the demo with settings from a TOML document.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn create_app_with_config(canvas_id: String, config: String) -> Result<app::App, JsValue> {
    let config = DemoConfig::from_toml_str(&config).map_err(|e| JsValue::from_str(&e))?;
    log::info!("Using config from page");
    app::App::new(&canvas_id, config).await
}
