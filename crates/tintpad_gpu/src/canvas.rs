//! Canvas size acquisition.
//!
//! The frame driver asks a [`CanvasSizeSource`] for the drawable size every
//! frame. Natively that is the window's inner size; in the browser it is the
//! canvas element's CSS box scaled by the device pixel ratio.

use std::fmt;
use std::sync::Arc;

use winit::window::Window;

/// Drawable size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A swap chain cannot be built for a zero-sized canvas (minimized window,
    /// collapsed element).
    pub fn is_presentable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for CanvasSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Something that can report the current drawable size.
pub trait CanvasSizeSource {
    fn canvas_size(&self) -> CanvasSize;
}

/// Reads the size from the host window.
#[derive(Clone)]
pub struct WindowCanvas {
    window: Arc<Window>,
}

impl WindowCanvas {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl CanvasSizeSource for WindowCanvas {
    fn canvas_size(&self) -> CanvasSize {
        self.window.inner_size().into()
    }
}

/// Reads the size from a `<canvas>` element's layout box.
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct HtmlCanvas {
    canvas: web_sys::HtmlCanvasElement,
}

#[cfg(target_arch = "wasm32")]
impl HtmlCanvas {
    pub fn new(canvas: web_sys::HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

#[cfg(target_arch = "wasm32")]
impl CanvasSizeSource for HtmlCanvas {
    fn canvas_size(&self) -> CanvasSize {
        let ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let width = (f64::from(self.canvas.client_width().max(0)) * ratio).round() as u32;
        let height = (f64::from(self.canvas.client_height().max(0)) * ratio).round() as u32;
        CanvasSize::new(width, height)
    }
}
