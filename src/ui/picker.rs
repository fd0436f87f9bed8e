//! Custom-painted color pickers: SV square with a hue or temperature bar, and
//! a hue wheel (ring plus SV triangle). Pickers never touch alpha.

use std::f32::consts::TAU;

use egui::{Color32, Id, Mesh, Pos2, Response, Sense, Shape, Stroke, Vec2};

use crate::color::{self, Rgba};
use crate::state::UiState;
use crate::ui_constants::picker;

const SV_GRID_STEPS: usize = 16;

/// HSV of `color`, reusing the last value a picker produced for it.
///
/// Converting back from RGB loses hue at zero saturation or value, so
/// without this the hue marker would jump to red whenever the SV marker
/// touches the grey or black edge.
pub(crate) fn hsv_of(ctx: &egui::Context, color: Rgba) -> [f32; 3] {
    let cached: Option<([f32; 3], [f32; 3])> = ctx.data(|d| d.get_temp(hsv_cache_id()));
    match cached {
        Some((rgb, hsv)) if rgb == color.rgb() => hsv,
        _ => color.to_hsv(),
    }
}

/// Write `hsv` into `color` (alpha kept) and remember it for [`hsv_of`].
pub(crate) fn set_hsv(ctx: &egui::Context, color: &mut Rgba, hsv: [f32; 3]) {
    let [h, s, v] = hsv;
    *color = Rgba::from_hsv(h, s, v, color.a);
    ctx.data_mut(|d| d.insert_temp(hsv_cache_id(), (color.rgb(), hsv)));
}

fn hsv_cache_id() -> Id {
    Id::new("tintpad_picker_hsv")
}

/// SV square with a hue bar, or a temperature bar in temperature mode.
pub fn square_with_bar(ui: &mut egui::Ui, state: &mut UiState, width: f32) {
    let side = (width - picker::BAR_WIDTH - picker::BAR_GAP).max(picker::BAR_WIDTH);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = picker::BAR_GAP;
        sv_square(ui, &mut state.selected_color, side);
        if state.temperature_mode {
            temperature_bar(ui, state, side);
        } else {
            hue_bar(ui, &mut state.selected_color, side);
        }
    });
}

fn sv_square(ui: &mut egui::Ui, color: &mut Rgba, side: f32) -> Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(side), Sense::click_and_drag());
    let [h, mut s, mut v] = hsv_of(ui.ctx(), *color);

    if let Some(pos) = response.interact_pointer_pos() {
        s = ((pos.x - rect.left()) / rect.width()).clamp(0.0, 1.0);
        v = 1.0 - ((pos.y - rect.top()) / rect.height()).clamp(0.0, 1.0);
        set_hsv(ui.ctx(), color, [h, s, v]);
    }

    if ui.is_rect_visible(rect) {
        let mut mesh = Mesh::default();
        let n = SV_GRID_STEPS;
        for row in 0..=n {
            for col in 0..=n {
                let fs = col as f32 / n as f32;
                let fv = 1.0 - row as f32 / n as f32;
                let pos = Pos2::new(
                    rect.left() + fs * rect.width(),
                    rect.top() + (1.0 - fv) * rect.height(),
                );
                mesh.colored_vertex(pos, Rgba::from_hsv(h, fs, fv, 1.0).to_color32());
            }
        }
        let stride = (n + 1) as u32;
        for row in 0..n as u32 {
            for col in 0..n as u32 {
                let i = row * stride + col;
                mesh.add_triangle(i, i + 1, i + stride);
                mesh.add_triangle(i + 1, i + stride + 1, i + stride);
            }
        }
        let painter = ui.painter();
        painter.add(Shape::mesh(mesh));
        paint_marker(
            painter,
            Pos2::new(
                rect.left() + s * rect.width(),
                rect.top() + (1.0 - v) * rect.height(),
            ),
        );
    }
    response
}

/// Vertical gradient bar; `t` runs from 0 at the top to 1 at the bottom.
fn vertical_bar(
    ui: &mut egui::Ui,
    height: f32,
    t: f32,
    gradient: impl Fn(f32) -> Color32,
) -> (Response, Option<f32>) {
    let (rect, response) = ui.allocate_exact_size(
        Vec2::new(picker::BAR_WIDTH, height),
        Sense::click_and_drag(),
    );
    let picked = response
        .interact_pointer_pos()
        .map(|pos| ((pos.y - rect.top()) / rect.height()).clamp(0.0, 1.0));

    if ui.is_rect_visible(rect) {
        let mut mesh = Mesh::default();
        let steps = picker::SEGMENTS;
        for i in 0..=steps {
            let ti = i as f32 / steps as f32;
            let y = rect.top() + ti * rect.height();
            let c = gradient(ti);
            mesh.colored_vertex(Pos2::new(rect.left(), y), c);
            mesh.colored_vertex(Pos2::new(rect.right(), y), c);
        }
        for i in 0..steps as u32 {
            let b = i * 2;
            mesh.add_triangle(b, b + 1, b + 2);
            mesh.add_triangle(b + 1, b + 3, b + 2);
        }
        let painter = ui.painter();
        painter.add(Shape::mesh(mesh));

        let y = rect.top() + picked.unwrap_or(t) * rect.height();
        let line = [Pos2::new(rect.left() - 2.0, y), Pos2::new(rect.right() + 2.0, y)];
        painter.line_segment(line, Stroke::new(4.0, Color32::from_black_alpha(120)));
        painter.line_segment(line, Stroke::new(2.0, Color32::WHITE));
    }
    (response, picked)
}

fn hue_bar(ui: &mut egui::Ui, color: &mut Rgba, height: f32) {
    let [h, s, v] = hsv_of(ui.ctx(), *color);
    let (_, picked) = vertical_bar(ui, height, h, |t| {
        Rgba::from_hsv(t, 1.0, 1.0, 1.0).to_color32()
    });
    if let Some(h) = picked {
        set_hsv(ui.ctx(), color, [h, s, v]);
    }
}

fn kelvin_at(t: f32) -> f32 {
    color::KELVIN_MIN + t * (color::KELVIN_MAX - color::KELVIN_MIN)
}

fn temperature_bar(ui: &mut egui::Ui, state: &mut UiState, height: f32) {
    let t = (state.temperature_kelvin - color::KELVIN_MIN)
        / (color::KELVIN_MAX - color::KELVIN_MIN);
    let (response, picked) = vertical_bar(ui, height, t, |t| {
        let (r, g, b) = color::kelvin_to_rgb(kelvin_at(t));
        Rgba::new(r, g, b, 1.0).to_color32()
    });
    if let Some(t) = picked {
        state.set_temperature(kelvin_at(t));
    }
    response.on_hover_text(format!("{:.0} K", state.temperature_kelvin));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum WheelZone {
    #[default]
    None,
    Ring,
    Triangle,
}

/// Hue ring around an SV triangle that rotates with the hue.
pub fn hue_wheel(ui: &mut egui::Ui, color: &mut Rgba, width: f32) {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(width), Sense::click_and_drag());
    let center = rect.center();
    let outer_r = width * 0.5 - 2.0;
    let inner_r = outer_r * (1.0 - picker::RING_FRACTION);
    let tri_r = inner_r - 3.0;

    let [mut h, mut s, mut v] = hsv_of(ui.ctx(), *color);
    let [a, b, c] = triangle(center, tri_r, h);

    let zone_id = response.id.with("zone");
    let mut zone: WheelZone = ui.data(|d| d.get_temp(zone_id)).unwrap_or_default();

    if let Some(pos) = response.interact_pointer_pos() {
        let delta = pos - center;
        if response.drag_started() || response.clicked() {
            let dist = delta.length();
            zone = if dist >= inner_r - 4.0 && dist <= outer_r + 4.0 {
                WheelZone::Ring
            } else if dist < inner_r {
                WheelZone::Triangle
            } else {
                WheelZone::None
            };
        }
        match zone {
            WheelZone::Ring => {
                h = (delta.y.atan2(delta.x) / TAU).rem_euclid(1.0);
                set_hsv(ui.ctx(), color, [h, s, v]);
            }
            WheelZone::Triangle => {
                (s, v) = sv_from_triangle(pos, a, b, c);
                set_hsv(ui.ctx(), color, [h, s, v]);
            }
            WheelZone::None => {}
        }
    }
    if !response.dragged() {
        zone = WheelZone::None;
    }
    ui.data_mut(|d| d.insert_temp(zone_id, zone));

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.add(Shape::mesh(ring_mesh(center, inner_r, outer_r)));

        let [a, b, c] = triangle(center, tri_r, h);
        let mut tri = Mesh::default();
        tri.colored_vertex(a, Rgba::from_hsv(h, 1.0, 1.0, 1.0).to_color32());
        tri.colored_vertex(b, Color32::WHITE);
        tri.colored_vertex(c, Color32::BLACK);
        tri.add_triangle(0, 1, 2);
        painter.add(Shape::mesh(tri));

        let angle = h * TAU;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let line = [center + dir * (inner_r - 1.0), center + dir * (outer_r + 1.0)];
        painter.line_segment(line, Stroke::new(4.0, Color32::from_black_alpha(120)));
        painter.line_segment(line, Stroke::new(2.0, Color32::WHITE));

        let marker = a.to_vec2() * (s * v) + b.to_vec2() * ((1.0 - s) * v) + c.to_vec2() * (1.0 - v);
        paint_marker(painter, marker.to_pos2());
    }
}

/// Vertices of the SV triangle: pure hue, white, black.
fn triangle(center: Pos2, radius: f32, hue: f32) -> [Pos2; 3] {
    let angle = hue * TAU;
    [0.0, 1.0, 2.0].map(|k| {
        let a = angle + k * TAU / 3.0;
        center + Vec2::new(a.cos(), a.sin()) * radius
    })
}

fn ring_mesh(center: Pos2, inner_r: f32, outer_r: f32) -> Mesh {
    let mut mesh = Mesh::default();
    let segments = picker::SEGMENTS;
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let dir = Vec2::new((t * TAU).cos(), (t * TAU).sin());
        let c = Rgba::from_hsv(t, 1.0, 1.0, 1.0).to_color32();
        mesh.colored_vertex(center + dir * inner_r, c);
        mesh.colored_vertex(center + dir * outer_r, c);
    }
    for i in 0..segments as u32 {
        let b = i * 2;
        mesh.add_triangle(b, b + 1, b + 3);
        mesh.add_triangle(b, b + 3, b + 2);
    }
    mesh
}

/// Saturation and value for `p` inside triangle (hue, white, black),
/// clamped to the triangle.
fn sv_from_triangle(p: Pos2, a: Pos2, b: Pos2, c: Pos2) -> (f32, f32) {
    let (wa, wb, wc) = barycentric(p, a, b, c);
    let (wa, wb, wc) = (wa.max(0.0), wb.max(0.0), wc.max(0.0));
    let sum = wa + wb + wc;
    if sum <= f32::EPSILON {
        return (0.0, 0.0);
    }
    let (wa, wb) = (wa / sum, wb / sum);
    let v = (wa + wb).clamp(0.0, 1.0);
    let s = if v > 1e-3 { (wa / v).clamp(0.0, 1.0) } else { 0.0 };
    (s, v)
}

fn barycentric(p: Pos2, a: Pos2, b: Pos2, c: Pos2) -> (f32, f32, f32) {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let denom = v0.x * v1.y - v1.x * v0.y;
    if denom.abs() <= f32::EPSILON {
        return (1.0, 0.0, 0.0);
    }
    let wb = (v2.x * v1.y - v1.x * v2.y) / denom;
    let wc = (v0.x * v2.y - v2.x * v0.y) / denom;
    (1.0 - wb - wc, wb, wc)
}

fn paint_marker(painter: &egui::Painter, center: Pos2) {
    painter.circle_stroke(
        center,
        picker::MARKER_RADIUS,
        Stroke::new(3.0, Color32::from_black_alpha(160)),
    );
    painter.circle_stroke(center, picker::MARKER_RADIUS, Stroke::new(1.5, Color32::WHITE));
}
