use egui::{Id, Key};

use super::{fields, palette_grid, picker};
use crate::keybindings::{Action, KeyBindings};
use crate::state::UiState;
use crate::ui_constants::panel;

/// Fixed options panel: pickers, edit fields, palette and the key hint.
pub fn show(ctx: &egui::Context, state: &mut UiState, bindings: &KeyBindings) {
    egui::Window::new(panel::TITLE)
        .id(Id::new("options_panel"))
        .title_bar(false)
        .collapsible(false)
        .movable(false)
        .resizable(false)
        .fixed_pos(panel::POSITION)
        .fixed_size(panel::SIZE)
        .show(ctx, |ui| {
            ui.heading(panel::TITLE);
            ui.separator();
            ui.checkbox(&mut state.temperature_mode, "Temperature Mode");
            ui.add_space(4.0);

            let width = (ui.available_width() - ui.spacing().item_spacing.y)
                * panel::PICKER_WIDTH_FRACTION;
            ui.horizontal(|ui| {
                picker::square_with_bar(ui, state, width);
                if !state.temperature_mode {
                    picker::hue_wheel(ui, &mut state.selected_color, width);
                }
            });

            ui.add_space(4.0);
            fields::show(ui, state);
            ui.add_space(4.0);
            palette_grid::show(ui, state);
            ui.add_space(4.0);
            ui.label(hint_text(bindings.key_for_action(Action::ToggleOptions)));
        });
}

/// "PRESS SPACE BAR TO SHOW / HIDE OPTIONS UI", naming whatever key is bound.
pub fn hint_text(key: Key) -> String {
    let name = match key {
        Key::Space => "SPACE BAR".to_string(),
        other => other.name().to_uppercase(),
    };
    format!("PRESS {} TO SHOW / HIDE OPTIONS UI", name)
}
