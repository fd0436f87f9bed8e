//! Configuration structs for GPU settings.
//!
//! The swap chain uses one fixed pixel format for its whole lifetime and a
//! FIFO present mode unless told otherwise.

/// Configuration for GPU context initialization.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// Backends to try when creating the instance.
    pub backends: wgpu::Backends,
    /// Power preference for adapter selection.
    pub power_preference: wgpu::PowerPreference,
    /// Present mode (VSync behavior).
    pub present_mode: wgpu::PresentMode,
    /// Pixel format used for every swap chain, if the surface supports it.
    pub preferred_format: wgpu::TextureFormat,
    /// Requested MSAA sample count (1 disables multisampling).
    pub msaa_samples: u32,
    /// Maximum frames in flight.
    pub max_frame_latency: u32,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            power_preference: wgpu::PowerPreference::default(),
            present_mode: wgpu::PresentMode::Fifo,
            preferred_format: wgpu::TextureFormat::Rgba8Unorm,
            msaa_samples: default_msaa_samples(),
            max_frame_latency: 2,
        }
    }
}

// WebGPU surface creation that falls back to WebGL can leave the canvas unusable,
// so the browser build goes straight to GL.
#[cfg(target_arch = "wasm32")]
fn default_backends() -> wgpu::Backends {
    wgpu::Backends::GL
}

#[cfg(not(target_arch = "wasm32"))]
fn default_backends() -> wgpu::Backends {
    wgpu::Backends::PRIMARY
}

#[cfg(target_arch = "wasm32")]
fn default_msaa_samples() -> u32 {
    1
}

#[cfg(not(target_arch = "wasm32"))]
fn default_msaa_samples() -> u32 {
    4
}

impl GpuConfig {
    /// Set power preference.
    pub fn with_power_preference(mut self, pref: wgpu::PowerPreference) -> Self {
        self.power_preference = pref;
        self
    }

    /// Set present mode.
    pub fn with_present_mode(mut self, mode: wgpu::PresentMode) -> Self {
        self.present_mode = mode;
        self
    }

    /// Set the preferred swap-chain format.
    pub fn with_preferred_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.preferred_format = format;
        self
    }

    /// Set the MSAA sample count. Zero is treated as one.
    pub fn with_msaa_samples(mut self, samples: u32) -> Self {
        self.msaa_samples = samples.max(1);
        self
    }

    /// Set maximum frame latency.
    pub fn with_max_frame_latency(mut self, latency: u32) -> Self {
        self.max_frame_latency = latency;
        self
    }
}

/// Clear color for the render pass that paints the window background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ClearColor {
    /// Create from a straight-alpha color, multiplying the color channels by alpha.
    pub fn premultiplied(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: f64::from(r * a),
            g: f64::from(g * a),
            b: f64::from(b * a),
            a: f64::from(a),
        }
    }

    /// Convert to wgpu::Color.
    pub fn to_wgpu(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.r,
            g: self.g,
            b: self.b,
            a: self.a,
        }
    }
}

impl From<ClearColor> for wgpu::Color {
    fn from(c: ClearColor) -> Self {
        c.to_wgpu()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_present_mode_is_fifo() {
        let config = GpuConfig::default();
        assert_eq!(config.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(config.preferred_format, wgpu::TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn test_msaa_samples_never_zero() {
        let config = GpuConfig::default().with_msaa_samples(0);
        assert_eq!(config.msaa_samples, 1);
    }

    #[test]
    fn test_premultiplied_clear_color() {
        let c = ClearColor::premultiplied(1.0, 0.5, 0.25, 0.5);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.g - 0.25).abs() < 1e-6);
        assert!((c.b - 0.125).abs() < 1e-6);
        assert!((c.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_opaque_clear_color_is_unchanged() {
        let c = ClearColor::premultiplied(0.2, 0.4, 0.6, 1.0);
        let w: wgpu::Color = c.into();
        assert!((w.r - 0.2).abs() < 1e-6);
        assert!((w.g - 0.4).abs() < 1e-6);
        assert!((w.b - 0.6).abs() < 1e-6);
        assert_eq!(w.a, 1.0);
    }
}
