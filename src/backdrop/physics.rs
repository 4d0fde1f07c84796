use eframe::egui::Vec2;

use super::particle::Particle;

/// Advances one particle by one tick. Velocity is applied unscaled; the frame scheduler
/// fixes the tick rate.
pub fn step_particle(particle: &mut Particle, bounds: Vec2) {
    particle.position += particle.velocity;

    if particle.position.x < 0.0 || particle.position.x > bounds.x {
        particle.velocity.x = -particle.velocity.x;
        particle.position.x = particle.position.x.clamp(0.0, bounds.x.max(0.0));
    }
    if particle.position.y < 0.0 || particle.position.y > bounds.y {
        particle.velocity.y = -particle.velocity.y;
        particle.position.y = particle.position.y.clamp(0.0, bounds.y.max(0.0));
    }

    particle.pulse_phase += particle.pulse_speed;
}

pub fn step_all(particles: &mut [Particle], bounds: Vec2) {
    for particle in particles {
        step_particle(particle, bounds);
    }
}

/// Drawn radius for the breathing node glyph, between 0.4x and 1.0x of the base radius.
pub fn pulse_radius(particle: &Particle) -> f32 {
    particle.radius * (0.7 + 0.3 * particle.pulse_phase.sin())
}
