use egui::{Align2, Id};

use crate::diagnostics::Diagnostics;
use crate::ui_constants::debug;

/// Size diagnostics pinned to the top-right corner.
pub fn show(ctx: &egui::Context, diagnostics: &Diagnostics) {
    egui::Area::new(Id::new("debug_overlay"))
        .anchor(Align2::RIGHT_TOP, debug::MARGIN)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for line in diagnostics.lines() {
                    ui.monospace(line);
                }
            });
        });
}
