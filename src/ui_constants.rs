//! UI constants for consistent styling across the application.
//!
//! This module centralizes hardcoded sizes, positions and ranges.

/// Window defaults.
pub mod window {
    pub const TITLE: &str = "tintpad";
    /// Default inner size in logical pixels
    pub const DEFAULT_SIZE: (u32, u32) = (1280, 720);
    /// Element id of the canvas the browser build renders into
    pub const CANVAS_ID: &str = "canvas";
}

/// Text size constants.
pub mod text {
    /// Body text and labels
    pub const BODY: f32 = 16.0;
    /// Small text relative to body
    pub const SMALL_SCALE: f32 = 0.75;
    /// Heading text relative to body
    pub const HEADING_SCALE: f32 = 1.3;
}

/// Options panel geometry.
pub mod panel {
    pub const POSITION: [f32; 2] = [20.0, 20.0];
    pub const SIZE: [f32; 2] = [800.0, 600.0];
    pub const TITLE: &str = "OPTIONS";
    /// Share of the available width each picker takes
    pub const PICKER_WIDTH_FRACTION: f32 = 0.40;
}

/// Picker widget geometry.
pub mod picker {
    /// Width of the hue / temperature bar next to the SV square
    pub const BAR_WIDTH: f32 = 20.0;
    pub const BAR_GAP: f32 = 6.0;
    /// Hue ring thickness relative to the wheel radius
    pub const RING_FRACTION: f32 = 0.2;
    /// Segments used to tessellate the hue ring and bars
    pub const SEGMENTS: usize = 96;
    pub const MARKER_RADIUS: f32 = 5.0;
    /// Initial temperature marker position, roughly daylight
    pub const DEFAULT_KELVIN: f32 = 6500.0;
}

/// Edit field rows.
pub mod fields {
    pub const PREVIEW_SIZE: f32 = 20.0;
    pub const DRAG_SPEED: f64 = 0.002;
    pub const DECIMALS: usize = 3;
    pub const HEX_WIDTH: f32 = 110.0;
}

/// Palette grid.
pub mod palette {
    pub const SWATCH_SIZE: f32 = 20.0;
    pub const COLUMNS: usize = 8;
    pub const HEADING: &str = "Palette Presets";
    /// Square that follows the pointer while a color is dragged
    pub const DRAG_PREVIEW_SIZE: f32 = 16.0;
}

/// Debug overlay.
pub mod debug {
    /// Offset from the top-right corner
    pub const MARGIN: [f32; 2] = [-10.0, 10.0];
}
