//! tintpad - an egui color-picker demo on wgpu.
//!
//! Opens a window (a `<canvas>` in the browser build), draws an options panel
//! for editing one color and clears the background with it.

mod app;
pub mod color;
pub mod config;
mod diagnostics;
pub mod error;
mod fonts;
pub mod keybindings;
pub mod logging;
pub mod palette;
mod renderer;
pub mod state;
mod ui;
pub mod ui_constants;

pub use app::run;
pub use config::AppConfig;
pub use error::AppError;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
