//! Persistent UI values read and written by the widgets each frame.

use tintpad_gpu::ClearColor;

use crate::color::{self, Rgba};
use crate::keybindings::Action;
use crate::palette::{ColorPayload, Palette};
use crate::ui_constants::picker;

#[derive(Debug, Clone)]
pub struct UiState {
    pub show_options: bool,
    pub show_debug: bool,
    /// Picker one shows a temperature bar instead of a hue bar
    pub temperature_mode: bool,
    /// The color every picker and field edits
    pub selected_color: Rgba,
    /// Color the window is cleared with
    pub background_color: Rgba,
    pub palette: Palette,
    /// Last temperature picked on the temperature bar
    pub temperature_kelvin: f32,
    /// Text of the hex field; only follows `selected_color` while unfocused
    pub(crate) hex_text: String,
}

impl UiState {
    pub fn new(palette: Palette) -> Self {
        let selected_color = Rgba::GREY;
        Self {
            show_options: true,
            show_debug: false,
            temperature_mode: false,
            selected_color,
            background_color: Rgba::BLACK,
            palette,
            temperature_kelvin: picker::DEFAULT_KELVIN,
            hex_text: selected_color.to_hex(),
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleOptions => self.show_options = !self.show_options,
            Action::ToggleDebug => self.show_debug = !self.show_debug,
        }
    }

    /// Clicking swatch `index`: take its RGB, keep the current alpha.
    pub fn pick_palette(&mut self, index: usize) -> bool {
        match self.palette.pick(index, self.selected_color) {
            Some(color) => {
                self.selected_color = color;
                true
            }
            None => false,
        }
    }

    pub fn drop_on_palette(&mut self, index: usize, payload: &ColorPayload) -> bool {
        self.palette.apply_drop(index, payload)
    }

    /// Dropping a color on one of the edit-field previews.
    pub fn drop_on_selected(&mut self, payload: &ColorPayload) {
        payload.apply_to(&mut self.selected_color);
    }

    /// Take hue and saturation from the blackbody color at `kelvin`, keeping
    /// the current value and alpha.
    pub fn set_temperature(&mut self, kelvin: f32) {
        let kelvin = kelvin.clamp(color::KELVIN_MIN, color::KELVIN_MAX);
        self.temperature_kelvin = kelvin;

        let (r, g, b) = color::kelvin_to_rgb(kelvin);
        let (h, s, _) = color::rgb_to_hsv(r, g, b);
        let [_, _, v] = self.selected_color.to_hsv();
        self.selected_color = Rgba::from_hsv(h, s, v, self.selected_color.a);
    }

    /// End of the options panel: the background follows the selection.
    pub fn commit_background(&mut self) {
        self.background_color = self.selected_color;
    }

    /// Premultiplied clear color for the render pass.
    pub fn clear_color(&self) -> ClearColor {
        let c = self.background_color;
        ClearColor::premultiplied(c.r, c.g, c.b, c.a)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Palette::hsv_sweep())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE_SIZE;

    #[test]
    fn test_initial_state() {
        let state = UiState::default();
        assert!(state.show_options);
        assert!(!state.show_debug);
        assert!(!state.temperature_mode);
        assert_eq!(state.selected_color, Rgba::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(state.background_color, Rgba::BLACK);
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut state = UiState::default();
        for action in [Action::ToggleOptions, Action::ToggleDebug] {
            let before = (state.show_options, state.show_debug);
            state.apply(action);
            assert_ne!((state.show_options, state.show_debug), before);
            state.apply(action);
            assert_eq!((state.show_options, state.show_debug), before);
        }
    }

    #[test]
    fn test_click_first_swatch_scenario() {
        let mut state = UiState::default();
        assert!(state.pick_palette(0));
        let entry = state.palette.get(0).unwrap();
        assert_eq!(state.selected_color.rgb(), entry.rgb());
        assert_eq!(state.selected_color.a, 1.0);
    }

    #[test]
    fn test_click_every_swatch_keeps_alpha() {
        let mut state = UiState::default();
        state.selected_color.a = 0.4;
        for i in 0..PALETTE_SIZE {
            state.pick_palette(i);
            assert_eq!(state.selected_color.rgb(), state.palette.get(i).unwrap().rgb());
            assert_eq!(state.selected_color.a, 0.4);
        }
    }

    #[test]
    fn test_click_out_of_range_changes_nothing() {
        let mut state = UiState::default();
        assert!(!state.pick_palette(PALETTE_SIZE));
        assert_eq!(state.selected_color, Rgba::GREY);
    }

    #[test]
    fn test_drop_on_selected() {
        let mut state = UiState::default();
        state.selected_color.a = 0.3;
        state.drop_on_selected(&ColorPayload::Rgb([0.1, 0.2, 0.3]));
        assert_eq!(state.selected_color, Rgba::new(0.1, 0.2, 0.3, 0.3));

        state.drop_on_selected(&ColorPayload::Rgba([0.9, 0.8, 0.7, 0.6]));
        assert_eq!(state.selected_color, Rgba::new(0.9, 0.8, 0.7, 0.6));
    }

    #[test]
    fn test_temperature_keeps_value_and_alpha() {
        let mut state = UiState::default();
        state.selected_color = Rgba::new(0.6, 0.6, 0.6, 0.5);
        state.set_temperature(1000.0);

        let [_, s, v] = state.selected_color.to_hsv();
        assert!((v - 0.6).abs() < 1e-4);
        assert!(s > 0.9);
        assert_eq!(state.selected_color.a, 0.5);
        // warm end: red dominates, no blue
        assert!(state.selected_color.r > state.selected_color.g);
        assert!(state.selected_color.b.abs() < 1e-4);
    }

    #[test]
    fn test_temperature_clamped() {
        let mut state = UiState::default();
        state.set_temperature(100.0);
        assert_eq!(state.temperature_kelvin, color::KELVIN_MIN);
        state.set_temperature(1.0e6);
        assert_eq!(state.temperature_kelvin, color::KELVIN_MAX);
    }

    #[test]
    fn test_commit_and_clear_color() {
        let mut state = UiState::default();
        state.selected_color = Rgba::new(1.0, 0.5, 0.0, 0.5);
        state.commit_background();
        assert_eq!(state.background_color, state.selected_color);

        let clear = state.clear_color();
        assert!((clear.r - 0.5).abs() < 1e-6);
        assert!((clear.g - 0.25).abs() < 1e-6);
        assert_eq!(clear.b, 0.0);
        assert!((clear.a - 0.5).abs() < 1e-6);
    }
}
