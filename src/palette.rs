//! The editable 32-entry swatch palette.

use crate::color::Rgba;

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 32;

/// Saturation used for the initial sweep.
pub const SWEEP_SATURATION: f32 = 0.8;

/// Value used for the initial sweep.
pub const SWEEP_VALUE: f32 = 0.8;

/// Color carried by a drag-and-drop operation.
///
/// Palette swatches ignore alpha and drag three channels; the edit-field
/// previews drag all four.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorPayload {
    Rgb([f32; 3]),
    Rgba([f32; 4]),
}

impl ColorPayload {
    /// Color to show while dragging. Three-channel payloads preview as opaque.
    pub fn preview(&self) -> Rgba {
        match *self {
            ColorPayload::Rgb([r, g, b]) => Rgba::new(r, g, b, 1.0),
            ColorPayload::Rgba(c) => Rgba::from_array(c),
        }
    }

    /// Write the payload into `target`. A three-channel payload leaves alpha alone.
    pub fn apply_to(&self, target: &mut Rgba) {
        match *self {
            ColorPayload::Rgb(rgb) => *target = target.with_rgb(rgb),
            ColorPayload::Rgba(c) => *target = Rgba::from_array(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: [Rgba; PALETTE_SIZE],
}

impl Palette {
    /// Default palette: hue sweeps `0..=1` across the entries at fixed
    /// saturation and value, alpha 1.
    pub fn hsv_sweep() -> Self {
        Self::hsv_sweep_with(SWEEP_SATURATION, SWEEP_VALUE)
    }

    pub fn hsv_sweep_with(saturation: f32, value: f32) -> Self {
        let last = (PALETTE_SIZE - 1) as f32;
        let entries =
            std::array::from_fn(|n| Rgba::from_hsv(n as f32 / last, saturation, value, 1.0));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.entries.get(index).copied()
    }

    pub fn entries(&self) -> &[Rgba] {
        &self.entries
    }

    /// Color that results from clicking entry `index` while `selected` is the
    /// current color: the entry's RGB with `selected`'s alpha.
    pub fn pick(&self, index: usize, selected: Rgba) -> Option<Rgba> {
        self.get(index).map(|entry| selected.with_rgb(entry.rgb()))
    }

    /// What dragging entry `index` carries.
    pub fn drag_payload(&self, index: usize) -> Option<ColorPayload> {
        self.get(index).map(|entry| ColorPayload::Rgb(entry.rgb()))
    }

    /// Drop `payload` onto entry `index`. Returns false for an out-of-range index.
    pub fn apply_drop(&mut self, index: usize, payload: &ColorPayload) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                payload.apply_to(entry);
                true
            }
            None => false,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::hsv_sweep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_is_deterministic() {
        assert_eq!(Palette::hsv_sweep(), Palette::hsv_sweep());
    }

    #[test]
    fn test_sweep_alpha_is_one() {
        let palette = Palette::hsv_sweep();
        assert_eq!(palette.len(), PALETTE_SIZE);
        assert!(palette.entries().iter().all(|c| c.a == 1.0));
    }

    #[test]
    fn test_first_entry_is_red() {
        let c = Palette::hsv_sweep().get(0).unwrap();
        assert!((c.r - 0.8).abs() < 1e-5);
        assert!((c.g - 0.16).abs() < 1e-5);
        assert!((c.b - 0.16).abs() < 1e-5);
    }

    #[test]
    fn test_last_entry_wraps_to_red() {
        let palette = Palette::hsv_sweep();
        let first = palette.get(0).unwrap();
        let last = palette.get(PALETTE_SIZE - 1).unwrap();
        assert!((first.r - last.r).abs() < 1e-5);
        assert!((first.g - last.g).abs() < 1e-5);
        assert!((first.b - last.b).abs() < 1e-5);
    }

    #[test]
    fn test_pick_keeps_selected_alpha() {
        let palette = Palette::hsv_sweep();
        let selected = Rgba::new(0.5, 0.5, 0.5, 0.3);
        for i in 0..PALETTE_SIZE {
            let picked = palette.pick(i, selected).unwrap();
            assert_eq!(picked.rgb(), palette.get(i).unwrap().rgb());
            assert_eq!(picked.a, 0.3);
        }
        assert!(palette.pick(PALETTE_SIZE, selected).is_none());
    }

    #[test]
    fn test_rgb_drop_keeps_entry_alpha() {
        let mut palette = Palette::hsv_sweep();
        palette.apply_drop(3, &ColorPayload::Rgba([0.0, 0.0, 0.0, 0.25]));
        palette.apply_drop(3, &ColorPayload::Rgb([0.1, 0.2, 0.3]));
        assert_eq!(palette.get(3), Some(Rgba::new(0.1, 0.2, 0.3, 0.25)));
    }

    #[test]
    fn test_rgba_drop_overwrites_alpha() {
        let mut palette = Palette::hsv_sweep();
        assert!(palette.apply_drop(7, &ColorPayload::Rgba([0.4, 0.5, 0.6, 0.7])));
        assert_eq!(palette.get(7), Some(Rgba::new(0.4, 0.5, 0.6, 0.7)));
    }

    #[test]
    fn test_drop_touches_only_target() {
        let original = Palette::hsv_sweep();
        let mut palette = original.clone();
        palette.apply_drop(10, &ColorPayload::Rgb([1.0, 1.0, 1.0]));
        for i in (0..PALETTE_SIZE).filter(|&i| i != 10) {
            assert_eq!(palette.get(i), original.get(i));
        }
    }

    #[test]
    fn test_drop_out_of_range() {
        let mut palette = Palette::hsv_sweep();
        assert!(!palette.apply_drop(PALETTE_SIZE, &ColorPayload::Rgb([1.0, 1.0, 1.0])));
        assert_eq!(palette, Palette::hsv_sweep());
    }

    #[test]
    fn test_drag_payload_is_three_channel() {
        let palette = Palette::hsv_sweep();
        assert!(matches!(palette.drag_payload(0), Some(ColorPayload::Rgb(_))));
    }
}
