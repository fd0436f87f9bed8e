use egui::{Id, Sense, Vec2};

use super::{allocate_with_id, paint_drop_highlight, paint_swatch};
use crate::color::Rgba;
use crate::palette::ColorPayload;
use crate::state::UiState;
use crate::ui_constants::palette;

pub(crate) fn swatch_id(index: usize) -> Id {
    Id::new("palette_swatch").with(index)
}

/// Swatch grid. Click to select, drag to carry a color, drop to overwrite.
pub fn show(ui: &mut egui::Ui, state: &mut UiState) {
    ui.label(palette::HEADING);

    let mut clicked = None;
    let mut dropped = None;
    let gap = ui.spacing().item_spacing.y;

    for (row, chunk) in state.palette.entries().chunks(palette::COLUMNS).enumerate() {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = gap;
            for (col, entry) in chunk.iter().enumerate() {
                let index = row * palette::COLUMNS + col;
                let (rect, response) = allocate_with_id(
                    ui,
                    Vec2::splat(palette::SWATCH_SIZE),
                    swatch_id(index),
                    Sense::click_and_drag(),
                );
                if ui.is_rect_visible(rect) {
                    // Swatches ignore alpha
                    paint_swatch(ui.painter(), rect, Rgba { a: 1.0, ..*entry });
                    paint_drop_highlight(ui, rect, &response);
                }

                if response.clicked() {
                    clicked = Some(index);
                }
                if let Some(payload) = state.palette.drag_payload(index) {
                    response.dnd_set_drag_payload(payload);
                }
                if let Some(payload) = response.dnd_release_payload::<ColorPayload>() {
                    dropped = Some((index, *payload));
                }
            }
        });
    }

    if let Some(index) = clicked {
        state.pick_palette(index);
    }
    if let Some((index, payload)) = dropped
        && state.drop_on_palette(index, &payload)
    {
        log::debug!("Palette entry {} set to {:?}", index, payload);
    }
}
