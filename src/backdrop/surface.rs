use eframe::egui::{Color32, Pos2};

use super::theme::GradientStop;

/// Minimal drawing backend the simulation paints through.
pub trait Surface {
    /// Covers the whole surface with `color` at `alpha`, leaving older content faintly visible.
    fn wash(&mut self, color: Color32, alpha: f32);
    fn circle(&mut self, center: Pos2, radius: f32, color: Color32);
    fn gradient_circle(&mut self, center: Pos2, radius: f32, stops: &'static [GradientStop]);
    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    GradientCircle {
        center: Pos2,
        radius: f32,
        stops: &'static [GradientStop],
    },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
}

pub struct TrailLayer {
    pub opacity: f32,
    pub commands: Vec<DrawCommand>,
}

/// Retained surface for immediate-mode hosts.
///
/// Every wash starts a new layer and fades the older ones by the wash alpha, so replaying
/// the layers oldest-first gives the same picture as painting onto a persistent canvas.
pub struct TrailCanvas {
    layers: Vec<TrailLayer>,
    cutoff: f32,
    background: Color32,
}

impl TrailCanvas {
    pub fn new(cutoff: f32) -> Self {
        Self {
            layers: Vec::new(),
            cutoff,
            background: Color32::TRANSPARENT,
        }
    }

    pub fn layers(&self) -> &[TrailLayer] {
        &self.layers
    }

    /// Color the canvas converges to under repeated washes.
    pub fn background(&self) -> Color32 {
        self.background
    }

    fn push(&mut self, command: DrawCommand) {
        if self.layers.is_empty() {
            self.layers.push(TrailLayer {
                opacity: 1.0,
                commands: Vec::new(),
            });
        }
        if let Some(layer) = self.layers.last_mut() {
            layer.commands.push(command);
        }
    }
}

impl Surface for TrailCanvas {
    fn wash(&mut self, color: Color32, alpha: f32) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        let cutoff = self.cutoff;
        for layer in &mut self.layers {
            layer.opacity *= keep;
        }
        self.layers
            .retain(|layer| layer.opacity >= cutoff && !layer.commands.is_empty());
        self.background = color;
        self.layers.push(TrailLayer {
            opacity: 1.0,
            commands: Vec::new(),
        });
    }

    fn circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn gradient_circle(&mut self, center: Pos2, radius: f32, stops: &'static [GradientStop]) {
        self.push(DrawCommand::GradientCircle {
            center,
            radius,
            stops,
        });
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
