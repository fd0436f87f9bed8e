//! RGB, HSV and Hex edit rows for the selected color.

use egui::{DragValue, Id, Sense, Vec2};

use super::{allocate_with_id, paint_drop_highlight, paint_swatch, picker};
use crate::color::Rgba;
use crate::palette::ColorPayload;
use crate::state::UiState;
use crate::ui_constants::fields;

/// Row labels, also used to key the preview swatches.
pub(crate) const ROWS: [&str; 3] = ["RGB", "HSV", "Hex"];

pub(crate) fn preview_id(row: &str) -> Id {
    Id::new("field_preview").with(row)
}

pub fn show(ui: &mut egui::Ui, state: &mut UiState) {
    let mut dropped = None;
    egui::Grid::new("color_fields")
        .num_columns(3)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            for row in ROWS {
                if let Some(payload) = preview(ui, row, state.selected_color) {
                    dropped = Some(payload);
                }
                ui.label(row);
                match row {
                    "RGB" => rgb_row(ui, &mut state.selected_color),
                    "HSV" => hsv_row(ui, &mut state.selected_color),
                    _ => hex_row(ui, state),
                }
                ui.end_row();
            }
        });

    if let Some(payload) = dropped {
        state.drop_on_selected(&payload);
    }
}

/// Swatch of the current color. Dragging it carries all four channels;
/// returns whatever color was dropped on it this frame.
fn preview(ui: &mut egui::Ui, row: &str, color: Rgba) -> Option<ColorPayload> {
    let (rect, response) = allocate_with_id(
        ui,
        Vec2::splat(fields::PREVIEW_SIZE),
        preview_id(row),
        Sense::drag(),
    );
    if ui.is_rect_visible(rect) {
        paint_swatch(ui.painter(), rect, color);
        paint_drop_highlight(ui, rect, &response);
    }
    response.dnd_set_drag_payload(ColorPayload::Rgba(color.to_array()));
    response.dnd_release_payload::<ColorPayload>().map(|p| *p)
}

fn channel<'a>(value: &'a mut f32, prefix: &str) -> DragValue<'a> {
    DragValue::new(value)
        .speed(fields::DRAG_SPEED)
        .range(0.0..=1.0)
        .fixed_decimals(fields::DECIMALS)
        .prefix(format!("{}: ", prefix))
}

fn rgb_row(ui: &mut egui::Ui, color: &mut Rgba) {
    ui.horizontal(|ui| {
        let mut channels = color.to_array();
        let mut changed = false;
        for (value, prefix) in channels.iter_mut().zip(["R", "G", "B", "A"]) {
            changed |= ui.add(channel(value, prefix)).changed();
        }
        if changed {
            *color = Rgba::from_array(channels);
        }
    });
}

fn hsv_row(ui: &mut egui::Ui, color: &mut Rgba) {
    ui.horizontal(|ui| {
        let mut hsv = picker::hsv_of(ui.ctx(), *color);
        let mut alpha = color.a;
        let mut hsv_changed = false;
        for (value, prefix) in hsv.iter_mut().zip(["H", "S", "V"]) {
            hsv_changed |= ui.add(channel(value, prefix)).changed();
        }
        let alpha_changed = ui.add(channel(&mut alpha, "A")).changed();

        if alpha_changed {
            color.a = alpha;
        }
        if hsv_changed {
            picker::set_hsv(ui.ctx(), color, hsv);
        }
    });
}

fn hex_row(ui: &mut egui::Ui, state: &mut UiState) {
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.hex_text)
            .desired_width(fields::HEX_WIDTH)
            .char_limit(9)
            .font(egui::TextStyle::Monospace),
    );
    if response.changed()
        && let Some(color) = Rgba::from_hex(&state.hex_text)
    {
        state.selected_color = color;
    }
    // Follow the color unless the user is mid-edit
    if !response.has_focus() {
        state.hex_text = state.selected_color.to_hex();
    }
}
