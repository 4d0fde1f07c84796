mod connections;
mod particle;
mod physics;
mod scheduler;
mod surface;
mod theme;
mod viewport;

use eframe::egui::{Pos2, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::BackdropConfig;
use connections::{ConnectionParams, render_frame};
pub use connections::FrameStats;
use particle::SimulationState;
use physics::step_all;
use scheduler::FrameScheduler;
pub use surface::{DrawCommand, Surface, TrailCanvas};
pub use theme::{GradientStop, Palette, ThemeMode};
use viewport::ViewportManager;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Idle,
    Ticked,
    Reseeded,
}

/// Owns the particle simulation, its tick schedule and the surface it paints on.
///
/// The host drives it with [`Backdrop::on_frame`] on every display refresh and forwards
/// resize, pointer and theme events as they arrive.
pub struct Backdrop<S: Surface> {
    config: BackdropConfig,
    state: SimulationState,
    scheduler: FrameScheduler,
    viewport: ViewportManager,
    surface: Option<S>,
    rng: StdRng,
    last_stats: FrameStats,
}

impl<S: Surface> Backdrop<S> {
    pub fn create(
        config: BackdropConfig,
        surface: Option<S>,
        size: Vec2,
        theme: ThemeMode,
        now_ms: f64,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut backdrop = Self {
            scheduler: FrameScheduler::new(config.frame_interval_ms()),
            viewport: ViewportManager::new(size, config.resize_debounce_ms),
            state: SimulationState::new(size, theme),
            config,
            surface,
            rng,
            last_stats: FrameStats::default(),
        };

        if backdrop.surface.is_none() {
            log::debug!("no drawing surface available, backdrop stays inactive");
            return backdrop;
        }

        backdrop.reseed(now_ms);
        backdrop
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Standing scheduled items: the tick schedule and the resize debounce timer.
    pub fn pending_work(&self) -> usize {
        usize::from(self.scheduler.is_armed()) + usize::from(self.viewport.has_pending())
    }

    pub fn on_pointer_move(&mut self, position: Pos2) {
        self.state.pointer = position;
    }

    pub fn on_resize(&mut self, size: Vec2, now_ms: f64) {
        if !self.is_active() {
            return;
        }
        self.viewport.on_resize(size, now_ms);
    }

    /// Switching palettes reseeds the whole set; only an actual change does anything.
    pub fn set_theme(&mut self, theme: ThemeMode, now_ms: f64) {
        if self.state.theme == theme {
            return;
        }

        log::debug!("theme changed to {theme:?}");
        self.state.theme = theme;
        if self.is_active() {
            self.reseed(now_ms);
        }
    }

    /// Runs one scheduler invocation: settles a debounced resize, then ticks if the frame
    /// cap allows it.
    pub fn on_frame(&mut self, now_ms: f64) -> FrameOutcome {
        if !self.is_active() {
            return FrameOutcome::Idle;
        }

        if self.viewport.poll(now_ms).is_some() {
            self.reseed(now_ms);
            return FrameOutcome::Reseeded;
        }

        if !self.scheduler.poll(now_ms) {
            return FrameOutcome::Idle;
        }

        self.tick(now_ms);
        FrameOutcome::Ticked
    }

    /// Cancels all standing work and replaces every particle.
    pub fn reseed(&mut self, now_ms: f64) {
        self.scheduler.stop();
        self.viewport.cancel();

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.wash(self.state.theme.palette().wash, 1.0);

        self.state.size = self.viewport.size();
        self.state
            .reseed(&mut self.rng, self.config.area_per_node, self.config.max_nodes);
        self.last_stats = FrameStats::default();
        log::debug!(
            "seeded {} particles for {:.0}x{:.0}",
            self.state.particles.len(),
            self.state.size.x,
            self.state.size.y
        );

        self.scheduler.start(now_ms);
    }

    /// Tears everything down. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.scheduler.stop();
        self.viewport.cancel();
        if !self.state.particles.is_empty() {
            log::debug!("backdrop disposed");
        }
        self.state.particles.clear();
    }

    fn tick(&mut self, now_ms: f64) {
        let params = self.connection_params();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        step_all(&mut self.state.particles, self.state.size);
        debug_assert!(
            self.state
                .particles
                .iter()
                .all(|particle| self.state.in_bounds(particle))
        );
        self.last_stats = render_frame(
            surface,
            &self.state.particles,
            self.state.pointer,
            self.state.theme.palette(),
            params,
            now_ms,
        );
    }

    fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            link_distance: self.config.link_distance,
            pointer_radius: self.config.pointer_radius,
            neighbor_window: self.config.neighbor_window,
            highlight_threshold: self.config.highlight_threshold,
            trail_alpha: self.config.trail_alpha,
            sweep_period_ms: self.config.sweep_period_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::surface::tests::RecordingSurface;
    use super::*;

    fn config() -> BackdropConfig {
        BackdropConfig {
            seed: Some(42),
            ..BackdropConfig::default()
        }
    }

    fn backdrop(size: Vec2) -> Backdrop<RecordingSurface> {
        Backdrop::create(
            config(),
            Some(RecordingSurface::default()),
            size,
            ThemeMode::Dark,
            0.0,
        )
    }

    #[test]
    fn create_seeds_by_viewport_area() {
        let backdrop = backdrop(vec2(1000.0, 800.0));
        assert_eq!(backdrop.state.particles.len(), 100);
        assert_eq!(backdrop.pending_work(), 1);
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let mut backdrop = Backdrop::<RecordingSurface>::create(
            config(),
            None,
            vec2(1000.0, 800.0),
            ThemeMode::Dark,
            0.0,
        );
        assert!(!backdrop.is_active());
        assert_eq!(backdrop.state.particles.len(), 0);
        backdrop.on_resize(vec2(10.0, 10.0), 0.0);
        backdrop.set_theme(ThemeMode::Light, 1.0);
        assert_eq!(backdrop.on_frame(1000.0), FrameOutcome::Idle);
        assert_eq!(backdrop.pending_work(), 0);
    }

    #[test]
    fn particles_stay_in_bounds_over_many_ticks() {
        let mut backdrop = backdrop(vec2(300.0, 200.0));
        for step in 0..3000 {
            backdrop.on_frame(step as f64 * 16.0);
        }
        assert!(backdrop.scheduler.accepted_ticks() > 1000);
        assert!(
            backdrop
                .state
                .particles
                .iter()
                .all(|particle| backdrop.state.in_bounds(particle))
        );
    }

    #[test]
    fn zero_trail_settings_keep_the_canvas_bounded() {
        let config = BackdropConfig {
            trail_alpha: 0.0,
            trail_cutoff: 0.0,
            seed: Some(3),
            ..BackdropConfig::default()
        }
        .validated();
        let canvas = TrailCanvas::new(config.trail_cutoff);
        let mut backdrop = Backdrop::create(
            config,
            Some(canvas),
            vec2(300.0, 200.0),
            ThemeMode::Dark,
            0.0,
        );
        for step in 0..5000 {
            backdrop.on_frame(step as f64 * 34.0);
        }

        let layers = backdrop.surface().map_or(0, |canvas| canvas.layers().len());
        assert!(layers > 1);
        assert!(layers <= 21, "{layers} layers retained");
    }

    #[test]
    fn resize_burst_reseeds_once_with_final_size() {
        let mut backdrop = backdrop(vec2(400.0, 400.0));
        let mut reseeds = 0;

        for step in 0..10 {
            let at = step as f64 * 50.0;
            backdrop.on_resize(vec2(1000.0 + step as f32, 800.0), at);
            if backdrop.on_frame(at + 10.0) == FrameOutcome::Reseeded {
                reseeds += 1;
            }
        }
        let mut now = 450.0;
        while now < 2000.0 {
            now += 16.0;
            if backdrop.on_frame(now) == FrameOutcome::Reseeded {
                reseeds += 1;
            }
        }

        assert_eq!(reseeds, 1);
        assert_eq!(backdrop.state.size, vec2(1009.0, 800.0));
        assert_eq!(backdrop.state.particles.len(), 100);
        assert!(backdrop.pending_work() <= 1);
    }

    #[test]
    fn theme_change_reseeds_and_keeps_single_schedule() {
        let mut backdrop = backdrop(vec2(800.0, 600.0));
        for step in 0..20 {
            backdrop.on_frame(step as f64 * 40.0);
        }
        let before = backdrop.state.particles.clone();

        backdrop.on_resize(vec2(900.0, 600.0), 800.0);
        backdrop.set_theme(ThemeMode::Light, 810.0);
        backdrop.set_theme(ThemeMode::Dark, 820.0);
        backdrop.set_theme(ThemeMode::Dark, 830.0);

        assert_eq!(backdrop.state.theme, ThemeMode::Dark);
        assert_eq!(backdrop.pending_work(), 1);
        assert_eq!(backdrop.state.size, vec2(800.0, 600.0));
        assert_ne!(backdrop.state.particles, before);
    }

    #[test]
    fn pointer_is_read_on_next_tick() {
        let mut backdrop = backdrop(vec2(400.0, 300.0));
        backdrop.on_pointer_move(pos2(120.0, 80.0));
        assert_eq!(backdrop.state.pointer, pos2(120.0, 80.0));
        assert_eq!(backdrop.on_frame(40.0), FrameOutcome::Ticked);
        assert_eq!(backdrop.last_stats().nodes, 15);
    }

    #[test]
    fn ticks_draw_onto_the_surface() {
        let mut backdrop = backdrop(vec2(400.0, 300.0));
        assert_eq!(backdrop.on_frame(10.0), FrameOutcome::Idle);
        assert_eq!(backdrop.on_frame(40.0), FrameOutcome::Ticked);

        let surface = backdrop.surface().unwrap();
        // One wash from seeding, one from the tick.
        assert_eq!(surface.washes, 2);
        assert_eq!(surface.glows().len(), 15);
    }

    #[test]
    fn zero_area_runs_empty_then_recovers() {
        let mut backdrop = backdrop(Vec2::ZERO);
        assert_eq!(backdrop.state.particles.len(), 0);
        assert_eq!(backdrop.on_frame(40.0), FrameOutcome::Ticked);
        assert_eq!(backdrop.last_stats(), FrameStats::default());

        backdrop.on_resize(vec2(1000.0, 800.0), 50.0);
        assert_eq!(backdrop.on_frame(350.0), FrameOutcome::Reseeded);
        assert_eq!(backdrop.state.particles.len(), 100);
    }

    #[test]
    fn dispose_twice_leaves_nothing_pending() {
        let mut backdrop = backdrop(vec2(640.0, 480.0));
        backdrop.on_resize(vec2(700.0, 500.0), 5.0);
        assert_eq!(backdrop.pending_work(), 2);

        backdrop.dispose();
        backdrop.dispose();

        assert_eq!(backdrop.pending_work(), 0);
        assert_eq!(backdrop.state.particles.len(), 0);
        assert_eq!(backdrop.on_frame(10_000.0), FrameOutcome::Idle);
    }
}
