//! Per-frame UI logic.
//!
//! [`run_frame`] is called inside `egui::Context::run` once per frame. It
//! reads input, mutates [`UiState`] and lays out the visible panels.

mod debug;
mod fields;
mod options;
mod palette_grid;
mod picker;

use egui::{Color32, Id, LayerId, Order, Painter, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::color::Rgba;
use crate::diagnostics::Diagnostics;
use crate::keybindings::KeyBindings;
use crate::palette::ColorPayload;
use crate::state::UiState;
use crate::ui_constants::palette;

pub fn run_frame(
    ctx: &egui::Context,
    state: &mut UiState,
    bindings: &KeyBindings,
    diagnostics: &Diagnostics,
) {
    // Typing into a text field must not toggle panels
    if !ctx.wants_keyboard_input() {
        let events = ctx.input(|i| i.events.clone());
        for action in bindings.pressed_actions(&events) {
            state.apply(action);
        }
    }

    if state.show_options {
        options::show(ctx, state, bindings);
        state.commit_background();
    }

    if state.show_debug {
        debug::show(ctx, diagnostics);
    }

    paint_drag_preview(ctx);
}

/// Small square of the dragged color that follows the pointer.
fn paint_drag_preview(ctx: &egui::Context) {
    let Some(payload) = egui::DragAndDrop::payload::<ColorPayload>(ctx) else {
        return;
    };
    let Some(pointer) = ctx.pointer_latest_pos() else {
        return;
    };

    let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("color_drag_preview")));
    let rect = Rect::from_min_size(
        pointer + Vec2::splat(palette::DRAG_PREVIEW_SIZE * 0.5),
        Vec2::splat(palette::DRAG_PREVIEW_SIZE),
    );
    paint_swatch(&painter, rect, payload.preview());
    painter.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::WHITE), StrokeKind::Outside);
}

/// Allocate a `size` widget under a fixed `id`, so later frames and tests can
/// look its response up with `Context::read_response`.
pub(crate) fn allocate_with_id(
    ui: &mut egui::Ui,
    size: Vec2,
    id: Id,
    sense: Sense,
) -> (Rect, egui::Response) {
    let (_, space) = ui.allocate_space(size);
    let rect = ui.layout().align_size_within_rect(size, space);
    (rect, ui.interact(rect, id, sense))
}

/// White outline on a drop target while a color hovers over it.
pub(crate) fn paint_drop_highlight(ui: &egui::Ui, rect: Rect, response: &egui::Response) {
    if response.dnd_hover_payload::<ColorPayload>().is_some() {
        ui.painter()
            .rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::WHITE), StrokeKind::Outside);
    }
}

/// Fill `rect` with `color`, over a checkerboard when it is translucent.
pub(crate) fn paint_swatch(painter: &Painter, rect: Rect, color: Rgba) {
    if color.a < 1.0 {
        let cell = (rect.width().min(rect.height()) / 2.0).max(1.0);
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        let cols = (rect.width() / cell).ceil() as i32;
        let rows = (rect.height() / cell).ceil() as i32;
        for row in 0..rows {
            for col in 0..cols {
                if (row + col) % 2 == 1 {
                    let cell_rect = Rect::from_min_size(
                        rect.min + Vec2::new(col as f32 * cell, row as f32 * cell),
                        Vec2::splat(cell),
                    )
                    .intersect(rect);
                    painter.rect_filled(cell_rect, 0.0, Color32::from_gray(200));
                }
            }
        }
    }
    painter.rect_filled(rect, 0.0, color.to_color32());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::key_event;
    use egui::{Key, Pos2, RawInput};

    fn raw_input(events: Vec<egui::Event>) -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1280.0, 720.0))),
            events,
            ..Default::default()
        }
    }

    fn frame(ctx: &egui::Context, state: &mut UiState, events: Vec<egui::Event>) {
        let bindings = KeyBindings::default();
        let diagnostics = Diagnostics::default();
        let _ = ctx.run(raw_input(events), |ctx| {
            run_frame(ctx, state, &bindings, &diagnostics);
        });
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Lay the panel out and return the centre of widget `id`.
    fn settled_centre(ctx: &egui::Context, state: &mut UiState, id: Id) -> Pos2 {
        for _ in 0..2 {
            frame(ctx, state, vec![]);
        }
        ctx.read_response(id)
            .expect("widget laid out")
            .interact_rect
            .center()
    }

    fn drag(ctx: &egui::Context, state: &mut UiState, from: Pos2, to: Pos2) {
        frame(ctx, state, vec![egui::Event::PointerMoved(from)]);
        frame(ctx, state, vec![button(from, true)]);
        frame(ctx, state, vec![egui::Event::PointerMoved(from + Vec2::new(0.0, 10.0))]);
        frame(ctx, state, vec![egui::Event::PointerMoved(to)]);
        frame(ctx, state, vec![egui::Event::PointerMoved(to)]);
        frame(ctx, state, vec![button(to, false)]);
    }

    #[test]
    fn test_clicking_second_row_swatch_keeps_alpha() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        state.selected_color = Rgba::new(0.5, 0.5, 0.5, 0.4);

        // Row 1, column 5
        let index = palette::COLUMNS + 5;
        let at = settled_centre(&ctx, &mut state, palette_grid::swatch_id(index));
        frame(&ctx, &mut state, vec![egui::Event::PointerMoved(at)]);
        frame(&ctx, &mut state, vec![button(at, true)]);
        frame(&ctx, &mut state, vec![button(at, false)]);

        let entry = state.palette.get(index).unwrap();
        assert_eq!(state.selected_color.rgb(), entry.rgb());
        assert_eq!(state.selected_color.a, 0.4);
    }

    #[test]
    fn test_dragging_field_preview_onto_swatch_sets_all_channels() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        let dragged = Rgba::new(0.1, 0.2, 0.3, 0.4);
        state.selected_color = dragged;

        let target = 2;
        let to = settled_centre(&ctx, &mut state, palette_grid::swatch_id(target));
        let from = ctx
            .read_response(fields::preview_id("RGB"))
            .expect("preview laid out")
            .interact_rect
            .center();
        let untouched = state.palette.get(target + 1);

        drag(&ctx, &mut state, from, to);

        assert_eq!(state.palette.get(target), Some(dragged));
        assert_eq!(state.palette.get(target + 1), untouched);
    }

    #[test]
    fn test_dragging_swatch_onto_field_preview_keeps_alpha() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        state.selected_color = Rgba::new(0.5, 0.5, 0.5, 0.25);

        let source = 3;
        let from = settled_centre(&ctx, &mut state, palette_grid::swatch_id(source));
        let to = ctx
            .read_response(fields::preview_id("HSV"))
            .expect("preview laid out")
            .interact_rect
            .center();

        drag(&ctx, &mut state, from, to);

        let entry = state.palette.get(source).unwrap();
        assert_eq!(state.selected_color.rgb(), entry.rgb());
        assert_eq!(state.selected_color.a, 0.25);
        assert_eq!(state.palette, crate::palette::Palette::hsv_sweep());
    }

    #[test]
    fn test_space_toggles_options_panel() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();

        frame(&ctx, &mut state, vec![key_event(Key::Space, true, false)]);
        assert!(!state.show_options);

        // Held key repeats and the release do nothing
        frame(
            &ctx,
            &mut state,
            vec![
                key_event(Key::Space, true, true),
                key_event(Key::Space, false, false),
            ],
        );
        assert!(!state.show_options);

        frame(&ctx, &mut state, vec![key_event(Key::Space, true, false)]);
        assert!(state.show_options);
    }

    #[test]
    fn test_debug_key_toggles_overlay() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        frame(&ctx, &mut state, vec![key_event(Key::F1, true, false)]);
        assert!(state.show_debug);
        assert!(state.show_options);
        // Overlay with empty diagnostics must lay out without panicking
        frame(&ctx, &mut state, vec![]);
        assert!(state.show_debug);
    }

    #[test]
    fn test_background_follows_selection_only_while_panel_shown() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        state.selected_color = Rgba::new(0.2, 0.4, 0.6, 1.0);
        frame(&ctx, &mut state, vec![]);
        assert_eq!(state.background_color, state.selected_color);

        state.show_options = false;
        state.selected_color = Rgba::new(1.0, 0.0, 0.0, 1.0);
        frame(&ctx, &mut state, vec![]);
        assert_eq!(state.background_color, Rgba::new(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn test_unchanged_frame_keeps_selection() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        for _ in 0..3 {
            frame(&ctx, &mut state, vec![]);
        }
        assert_eq!(state.selected_color, Rgba::GREY);
        assert_eq!(state.hex_text, "#808080FF");
    }
}
