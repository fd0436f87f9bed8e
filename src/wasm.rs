use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::ui_constants::window;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AppConfig::default();
    crate::logging::init(config.log_level);
    log::info!("tintpad starting");
    log::info!("Winit uses exceptions for control flow; exception errors below can be ignored.");

    if let Err(e) = crate::run(config) {
        log::error!("Application error: {}", e);
    }
}

/// The page's `#canvas` element, or a new canvas appended to `<body>`.
pub(crate) fn find_or_create_canvas(size: (u32, u32)) -> Result<HtmlCanvasElement> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Canvas("no document".to_string()))?;

    if let Some(element) = document.get_element_by_id(window::CANVAS_ID) {
        return element.dyn_into::<HtmlCanvasElement>().map_err(|_| {
            AppError::Canvas(format!("#{} is not a <canvas>", window::CANVAS_ID))
        });
    }

    let canvas = document
        .create_element("canvas")
        .map_err(|_| AppError::Canvas("failed to create canvas".to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| AppError::Canvas("failed to convert to canvas".to_string()))?;
    canvas.set_id(window::CANVAS_ID);
    canvas.set_width(size.0);
    canvas.set_height(size.1);

    let body = document
        .body()
        .ok_or_else(|| AppError::Canvas("no body in document".to_string()))?;
    body.append_child(&canvas)
        .map_err(|_| AppError::Canvas("failed to append canvas to body".to_string()))?;
    Ok(canvas)
}
