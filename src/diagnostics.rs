//! Per-frame numbers shown in the debug overlay.

use web_time::{Duration, Instant};

use tintpad_gpu::CanvasSize;

/// Browser-side measurements, only available in the wasm build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrowserMetrics {
    /// `window.innerWidth/innerHeight` in CSS pixels
    pub inner_size: (f64, f64),
    /// `screen.width/height` in CSS pixels
    pub screen_size: (i32, i32),
    pub device_pixel_ratio: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub window_physical: CanvasSize,
    pub window_logical: (f64, f64),
    pub scale_factor: f64,
    /// Size the swap chain was last built at
    pub framebuffer: Option<CanvasSize>,
    /// Size read from the canvas size source this frame
    pub canvas: CanvasSize,
    /// Monitor resolution, when the platform reports one
    pub display: Option<CanvasSize>,
    pub swap_chain_recreations: u64,
    pub msaa_samples: u32,
    /// Size of the multisampled texture, none when drawing straight to the swap chain
    pub msaa_target: Option<CanvasSize>,
    pub surface_format: String,
    pub frame_time: Duration,
    pub frame_count: u64,
    pub browser: Option<BrowserMetrics>,
}

impl Diagnostics {
    pub fn fps(&self) -> f64 {
        let secs = self.frame_time.as_secs_f64();
        if secs > 0.0 { 1.0 / secs } else { 0.0 }
    }

    /// Text lines rendered by the overlay, in display order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Frame {}  {:.2} ms ({:.0} fps)",
                self.frame_count,
                self.frame_time.as_secs_f64() * 1000.0,
                self.fps()
            ),
            format!("Window (physical): {}", self.window_physical),
            format!(
                "Window (logical): {:.0}x{:.0}",
                self.window_logical.0, self.window_logical.1
            ),
            format!("Scale factor: {:.2}", self.scale_factor),
            format!("Canvas: {}", self.canvas),
            match self.framebuffer {
                Some(size) => format!("Framebuffer: {}", size),
                None => "Framebuffer: none".to_string(),
            },
            match self.display {
                Some(size) => format!("Display: {}", size),
                None => "Display: unknown".to_string(),
            },
            format!("Swap chain rebuilds: {}", self.swap_chain_recreations),
            format!("MSAA: {}x  Format: {}", self.msaa_samples, self.surface_format),
            match self.msaa_target {
                Some(size) => format!("MSAA target: {}", size),
                None => "MSAA target: none".to_string(),
            },
        ];

        if let Some(browser) = &self.browser {
            lines.push(format!(
                "Browser inner: {:.0}x{:.0}",
                browser.inner_size.0, browser.inner_size.1
            ));
            lines.push(format!(
                "Screen: {}x{}",
                browser.screen_size.0, browser.screen_size.1
            ));
            lines.push(format!("devicePixelRatio: {:.2}", browser.device_pixel_ratio));
        }
        lines
    }
}

/// Measures the time between consecutive frames.
#[derive(Debug)]
pub struct FrameTimer {
    last: Option<Instant>,
    frames: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self { last: None, frames: 0 }
    }

    /// Start a new frame, returning the time since the previous one.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last = Some(now);
        self.frames += 1;
        elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
pub fn browser_metrics() -> Option<BrowserMetrics> {
    let window = web_sys::window()?;
    let inner_width = window.inner_width().ok()?.as_f64()?;
    let inner_height = window.inner_height().ok()?.as_f64()?;
    let screen = window.screen().ok()?;
    Some(BrowserMetrics {
        inner_size: (inner_width, inner_height),
        screen_size: (screen.width().ok()?, screen.height().ok()?),
        device_pixel_ratio: window.device_pixel_ratio(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn browser_metrics() -> Option<BrowserMetrics> {
    None
}
