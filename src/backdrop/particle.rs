use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, pos2, vec2};
use rand::Rng;

use super::theme::ThemeMode;

const MAX_SPEED_PER_AXIS: f32 = 0.25;
const MIN_RADIUS: f32 = 2.5;
const MAX_RADIUS: f32 = 6.0;
const MIN_PULSE_SPEED: f32 = 0.03;
const MAX_PULSE_SPEED: f32 = 0.08;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Pos2,
    pub velocity: Vec2,
    pub radius: f32,
    pub pulse_phase: f32,
    pub pulse_speed: f32,
}

impl Particle {
    pub fn random(rng: &mut impl Rng, size: Vec2) -> Self {
        Self {
            position: pos2(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y),
            velocity: vec2(
                (rng.random::<f32>() - 0.5) * 2.0 * MAX_SPEED_PER_AXIS,
                (rng.random::<f32>() - 0.5) * 2.0 * MAX_SPEED_PER_AXIS,
            ),
            radius: MIN_RADIUS + rng.random::<f32>() * (MAX_RADIUS - MIN_RADIUS),
            pulse_phase: rng.random::<f32>() * TAU,
            pulse_speed: MIN_PULSE_SPEED
                + rng.random::<f32>() * (MAX_PULSE_SPEED - MIN_PULSE_SPEED),
        }
    }
}

/// Number of particles for a viewport: one per `area_per_node` square units, capped.
pub fn node_count(size: Vec2, area_per_node: f32, max_nodes: usize) -> usize {
    let area = (size.x.max(0.0) as f64) * (size.y.max(0.0) as f64);
    let count = (area / area_per_node as f64).floor() as usize;
    count.min(max_nodes)
}

pub struct SimulationState {
    pub particles: Vec<Particle>,
    pub size: Vec2,
    pub pointer: Pos2,
    pub theme: ThemeMode,
}

impl SimulationState {
    pub fn new(size: Vec2, theme: ThemeMode) -> Self {
        Self {
            particles: Vec::new(),
            size,
            pointer: Pos2::ZERO,
            theme,
        }
    }

    /// Discards every particle and creates a fresh set sized for the current viewport.
    pub fn reseed(&mut self, rng: &mut impl Rng, area_per_node: f32, max_nodes: usize) {
        let count = node_count(self.size, area_per_node, max_nodes);
        let size = self.size;
        self.particles.clear();
        self.particles.extend((0..count).map(|_| Particle::random(rng, size)));
    }

    pub fn in_bounds(&self, particle: &Particle) -> bool {
        (0.0..=self.size.x).contains(&particle.position.x)
            && (0.0..=self.size.y).contains(&particle.position.y)
    }
}
