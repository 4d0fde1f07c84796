use std::f32::consts::TAU;

use eframe::egui::epaint::Mesh;
use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, vec2};

use crate::backdrop::{DrawCommand, GradientStop, Palette, TrailCanvas};

const GRADIENT_SEGMENTS: u32 = 16;

/// Replays the retained trail layers, oldest first, in canvas coordinates offset by `rect.min`.
///
/// The rect is first filled with the blend's identity color, so compositing the canvas at
/// `palette.canvas_opacity` matches a screen or multiply blend over that backing.
pub(super) fn paint_canvas(
    painter: &Painter,
    rect: Rect,
    canvas: &TrailCanvas,
    palette: &Palette,
) {
    let opacity = palette.canvas_opacity;
    painter.rect_filled(rect, 0.0, palette.blend.identity());
    painter.rect_filled(rect, 0.0, canvas.background().gamma_multiply(opacity));

    let offset = rect.min.to_vec2();
    for layer in canvas.layers() {
        let layer_opacity = layer.opacity * opacity;
        for command in &layer.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    painter.circle_filled(
                        *center + offset,
                        *radius,
                        color.gamma_multiply(layer_opacity),
                    );
                }
                DrawCommand::GradientCircle {
                    center,
                    radius,
                    stops,
                } => {
                    painter.add(Shape::mesh(radial_gradient(
                        *center + offset,
                        *radius,
                        stops,
                        layer_opacity,
                    )));
                }
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    painter.line_segment(
                        [*from + offset, *to + offset],
                        Stroke::new(*width, color.gamma_multiply(layer_opacity)),
                    );
                }
            }
        }
    }
}

/// Triangle-fan mesh with one ring per gradient stop; colors interpolate between rings.
fn radial_gradient(center: Pos2, radius: f32, stops: &[GradientStop], opacity: f32) -> Mesh {
    let mut mesh = Mesh::default();
    let Some(first) = stops.first() else {
        return mesh;
    };

    mesh.colored_vertex(center, first.color.gamma_multiply(opacity));
    let mut previous_ring: Option<u32> = None;
    for stop in stops.iter().filter(|stop| stop.offset > 0.0) {
        let ring_start = mesh.vertices.len() as u32;
        let ring_radius = radius * stop.offset.min(1.0);
        let color = stop.color.gamma_multiply(opacity);
        for segment in 0..GRADIENT_SEGMENTS {
            let angle = segment as f32 / GRADIENT_SEGMENTS as f32 * TAU;
            mesh.colored_vertex(center + vec2(angle.cos(), angle.sin()) * ring_radius, color);
        }

        for segment in 0..GRADIENT_SEGMENTS {
            let next = (segment + 1) % GRADIENT_SEGMENTS;
            match previous_ring {
                None => mesh.add_triangle(0, ring_start + segment, ring_start + next),
                Some(previous) => {
                    mesh.add_triangle(previous + segment, ring_start + segment, ring_start + next);
                    mesh.add_triangle(previous + segment, ring_start + next, previous + next);
                }
            }
        }
        previous_ring = Some(ring_start);
    }

    mesh
}

pub(super) fn overlay_text_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_gray(240)
    } else {
        Color32::from_gray(30)
    }
}
