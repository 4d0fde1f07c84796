use eframe::egui::Pos2;

use super::particle::Particle;
use super::physics::pulse_radius;
use super::surface::Surface;
use super::theme::{Palette, with_opacity};

const BASE_EDGE_OPACITY: f32 = 0.6;
const POINTER_EDGE_OPACITY: f32 = 0.6;
const BASE_EDGE_WIDTH: f32 = 1.2;
const POINTER_EDGE_WIDTH: f32 = 2.0;
const PULSE_DOT_RADIUS: f32 = 3.0;
const PULSE_HALO_RADIUS: f32 = 6.0;

#[derive(Clone, Copy, Debug)]
pub struct ConnectionParams {
    pub link_distance: f32,
    pub pointer_radius: f32,
    pub neighbor_window: usize,
    pub highlight_threshold: f32,
    pub trail_alpha: f32,
    pub sweep_period_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub nodes: usize,
    pub edges: usize,
    pub highlights: usize,
}

/// Pointer weight in `[0, 1]` for an edge whose midpoint is `midpoint`.
pub fn pointer_influence(midpoint: Pos2, pointer: Pos2, pointer_radius: f32) -> f32 {
    (1.0 - midpoint.distance(pointer) / pointer_radius).max(0.0)
}

/// Position of the traveling highlight along an edge, repeating every sweep period.
pub fn sweep_fraction(now_ms: f64, period_ms: f64) -> f32 {
    (now_ms.rem_euclid(period_ms) / period_ms) as f32
}

/// Washes the surface, then draws node glyphs and the windowed neighbor edges.
pub fn render_frame(
    surface: &mut impl Surface,
    particles: &[Particle],
    pointer: Pos2,
    palette: &Palette,
    params: ConnectionParams,
    now_ms: f64,
) -> FrameStats {
    surface.wash(palette.wash, params.trail_alpha);

    for particle in particles {
        draw_node(surface, particle, palette);
    }

    let mut stats = FrameStats {
        nodes: particles.len(),
        ..FrameStats::default()
    };
    let sweep = sweep_fraction(now_ms, params.sweep_period_ms);
    let count = particles.len();

    for (index, first) in particles.iter().enumerate() {
        let window_end = index.saturating_add(params.neighbor_window).min(count);
        for second in &particles[(index + 1).min(window_end)..window_end] {
            let distance = first.position.distance(second.position);
            if distance >= params.link_distance {
                continue;
            }

            let midpoint = first.position.lerp(second.position, 0.5);
            let influence = pointer_influence(midpoint, pointer, params.pointer_radius);
            let opacity = ((1.0 - distance / params.link_distance) * BASE_EDGE_OPACITY
                + influence * POINTER_EDGE_OPACITY)
                .min(1.0);
            let width = BASE_EDGE_WIDTH + influence * POINTER_EDGE_WIDTH;
            surface.line(
                first.position,
                second.position,
                width,
                with_opacity(palette.edge, opacity),
            );
            stats.edges += 1;

            if influence > params.highlight_threshold {
                let at = first.position.lerp(second.position, sweep);
                surface.circle(
                    at,
                    PULSE_DOT_RADIUS,
                    with_opacity(palette.pulse, influence * palette.pulse_alpha),
                );
                surface.circle(
                    at,
                    PULSE_HALO_RADIUS,
                    with_opacity(palette.pulse_halo, influence * palette.pulse_halo_alpha),
                );
                stats.highlights += 1;
            }
        }
    }

    stats
}

fn draw_node(surface: &mut impl Surface, particle: &Particle, palette: &Palette) {
    let radius = pulse_radius(particle);
    surface.gradient_circle(particle.position, radius * 2.0, palette.glow);
    surface.circle(particle.position, radius, palette.core);
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Vec2, pos2};

    use super::super::surface::tests::RecordingSurface;
    use super::super::theme::ThemeMode;
    use super::*;

    fn params() -> ConnectionParams {
        ConnectionParams {
            link_distance: 200.0,
            pointer_radius: 120.0,
            neighbor_window: 20,
            highlight_threshold: 0.3,
            trail_alpha: 0.15,
            sweep_period_ms: 1000.0,
        }
    }

    fn at(x: f32, y: f32) -> Particle {
        Particle {
            position: pos2(x, y),
            velocity: Vec2::ZERO,
            radius: 4.0,
            pulse_phase: 0.0,
            pulse_speed: 0.05,
        }
    }

    fn far_pointer() -> Pos2 {
        pos2(-10_000.0, -10_000.0)
    }

    #[test]
    fn distance_gate_is_exclusive_at_link_distance() {
        let palette = ThemeMode::Dark.palette();

        let mut near = RecordingSurface::default();
        let stats = render_frame(
            &mut near,
            &[at(0.0, 0.0), at(199.0, 0.0)],
            far_pointer(),
            palette,
            params(),
            0.0,
        );
        assert_eq!(stats.edges, 1);
        assert_eq!(near.lines().len(), 1);

        let mut far = RecordingSurface::default();
        let stats = render_frame(
            &mut far,
            &[at(0.0, 0.0), at(201.0, 0.0)],
            far_pointer(),
            palette,
            params(),
            0.0,
        );
        assert_eq!(stats.edges, 0);
        assert!(far.lines().is_empty());

        let mut exact = RecordingSurface::default();
        render_frame(
            &mut exact,
            &[at(0.0, 0.0), at(200.0, 0.0)],
            far_pointer(),
            palette,
            params(),
            0.0,
        );
        assert!(exact.lines().is_empty());
    }

    #[test]
    fn only_the_index_window_is_searched() {
        // All 30 particles sit on one spot, so every pair passes the distance gate.
        let particles = (0..30).map(|_| at(50.0, 50.0)).collect::<Vec<_>>();
        let mut surface = RecordingSurface::default();
        let stats = render_frame(
            &mut surface,
            &particles,
            far_pointer(),
            ThemeMode::Dark.palette(),
            params(),
            0.0,
        );

        // Indices 0..=10 see a full window of 19; after that the window runs into the end.
        let expected = 19 * 11 + (0..19).sum::<usize>();
        assert_eq!(stats.edges, expected);
        assert!(stats.edges < 30 * 29 / 2);
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let particles = (0..5).map(|step| at(step as f32, 0.0)).collect::<Vec<_>>();
        let mut surface = RecordingSurface::default();
        let stats = render_frame(
            &mut surface,
            &particles,
            far_pointer(),
            ThemeMode::Dark.palette(),
            ConnectionParams {
                neighbor_window: usize::MAX,
                ..params()
            },
            0.0,
        );
        assert_eq!(stats.edges, 4 + 3 + 2 + 1);
    }

    #[test]
    fn edge_style_without_pointer() {
        let mut surface = RecordingSurface::default();
        render_frame(
            &mut surface,
            &[at(0.0, 0.0), at(100.0, 0.0)],
            far_pointer(),
            ThemeMode::Dark.palette(),
            params(),
            0.0,
        );

        let (_, _, width, color) = surface.lines()[0];
        assert_eq!(width, 1.2);
        // (1 - 100/200) * 0.6 = 0.3
        assert_eq!(color.a(), (0.3f32 * 255.0).round() as u8);
    }

    #[test]
    fn pointer_on_midpoint_boosts_edge_and_adds_highlight() {
        let mut surface = RecordingSurface::default();
        let stats = render_frame(
            &mut surface,
            &[at(0.0, 0.0), at(20.0, 0.0)],
            pos2(10.0, 0.0),
            ThemeMode::Dark.palette(),
            params(),
            250.0,
        );

        let (_, _, width, color) = surface.lines()[0];
        assert!((width - 3.2).abs() < 1e-5);
        assert_eq!(color.a(), 255);
        assert_eq!(stats.highlights, 1);

        // Two glyph cores plus the pulse dot and its halo.
        let circles = surface.circles();
        assert_eq!(circles.len(), 4);
        assert_eq!(circles[2].0, pos2(5.0, 0.0));
        assert_eq!(circles[2].1, 3.0);
        assert_eq!(circles[3].1, 6.0);
    }

    #[test]
    fn weak_influence_draws_no_highlight() {
        let mut surface = RecordingSurface::default();
        let stats = render_frame(
            &mut surface,
            &[at(0.0, 0.0), at(100.0, 0.0)],
            // 90 units from the midpoint: influence 0.25.
            pos2(50.0, 90.0),
            ThemeMode::Light.palette(),
            params(),
            0.0,
        );
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.highlights, 0);
        assert!((surface.lines()[0].2 - 1.7).abs() < 1e-5);
    }

    #[test]
    fn influence_and_sweep_formulas() {
        assert_eq!(pointer_influence(pos2(0.0, 0.0), pos2(0.0, 0.0), 120.0), 1.0);
        assert_eq!(pointer_influence(pos2(0.0, 0.0), pos2(120.0, 0.0), 120.0), 0.0);
        assert_eq!(pointer_influence(pos2(0.0, 0.0), pos2(500.0, 0.0), 120.0), 0.0);
        assert!((pointer_influence(pos2(0.0, 0.0), pos2(60.0, 0.0), 120.0) - 0.5).abs() < 1e-6);

        assert_eq!(sweep_fraction(1250.0, 1000.0), 0.25);
        assert_eq!(sweep_fraction(3000.0, 1000.0), 0.0);
    }

    #[test]
    fn every_node_gets_glow_and_core() {
        let mut particle = at(10.0, 10.0);
        particle.pulse_phase = std::f32::consts::FRAC_PI_2;
        let mut surface = RecordingSurface::default();
        render_frame(
            &mut surface,
            &[particle],
            far_pointer(),
            ThemeMode::Dark.palette(),
            params(),
            0.0,
        );

        assert_eq!(surface.washes, 1);
        let glows = surface.glows();
        assert_eq!(glows.len(), 1);
        assert_eq!(glows[0].0, pos2(10.0, 10.0));
        assert!((glows[0].1 - 8.0).abs() < 1e-5);
        assert!((surface.circles()[0].1 - 4.0).abs() < 1e-5);
    }

    #[test]
    fn empty_set_only_washes() {
        let mut surface = RecordingSurface::default();
        let stats = render_frame(
            &mut surface,
            &[],
            Pos2::ZERO,
            ThemeMode::Dark.palette(),
            params(),
            0.0,
        );
        assert_eq!(stats, FrameStats::default());
        assert_eq!(surface.washes, 1);
        assert!(surface.commands.is_empty());
    }
}
