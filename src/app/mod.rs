use eframe::egui::{self, Align2, Context, FontId, Key, Pos2, Sense, Vec2, ViewportCommand, vec2};

use crate::backdrop::{Backdrop, FrameOutcome, ThemeMode, TrailCanvas};
use crate::config::BackdropConfig;

mod render_utils;
mod stats;

use render_utils::{overlay_text_color, paint_canvas};
use stats::TickStats;

pub struct BackdropApp {
    config: BackdropConfig,
    backdrop: Option<Backdrop<TrailCanvas>>,
    last_size: Option<Vec2>,
    last_pointer: Option<Pos2>,
    stats: Option<TickStats>,
}

impl BackdropApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: BackdropConfig,
        theme: ThemeMode,
        show_stats: bool,
    ) -> Self {
        cc.egui_ctx.set_visuals(match theme {
            ThemeMode::Dark => egui::Visuals::dark(),
            ThemeMode::Light => egui::Visuals::light(),
        });

        Self {
            config,
            backdrop: None,
            last_size: None,
            last_pointer: None,
            stats: show_stats.then(TickStats::default),
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let (toggle_theme, close) =
            ctx.input(|input| (input.key_pressed(Key::T), input.key_pressed(Key::Escape)));

        if toggle_theme {
            let next = ThemeMode::from_dark_mode(ctx.style().visuals.dark_mode).toggled();
            ctx.set_visuals(match next {
                ThemeMode::Dark => egui::Visuals::dark(),
                ThemeMode::Light => egui::Visuals::light(),
            });
        }

        if close {
            if let Some(backdrop) = self.backdrop.as_mut() {
                backdrop.dispose();
            }
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }

    fn draw(&mut self, ui: &mut egui::Ui, now_ms: f64, theme: ThemeMode) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        let size = rect.size();

        let backdrop = self.backdrop.get_or_insert_with(|| {
            log::info!(
                "starting backdrop at {:.0}x{:.0}, {} fps cap",
                size.x,
                size.y,
                self.config.target_fps
            );
            Backdrop::create(
                self.config.clone(),
                Some(TrailCanvas::new(self.config.trail_cutoff)),
                size,
                theme,
                now_ms,
            )
        });

        if self.last_size.is_some_and(|last| last != size) {
            backdrop.on_resize(size, now_ms);
        }
        self.last_size = Some(size);

        let pointer = ui.input(|input| input.pointer.latest_pos());
        if let Some(pointer) = pointer
            && self.last_pointer != Some(pointer)
        {
            backdrop.on_pointer_move(pointer - rect.min.to_vec2());
            self.last_pointer = Some(pointer);
        }

        backdrop.set_theme(theme, now_ms);

        match backdrop.on_frame(now_ms) {
            FrameOutcome::Ticked => {
                if let Some(stats) = self.stats.as_mut() {
                    stats.record_tick(now_ms, backdrop.last_stats());
                }
            }
            FrameOutcome::Reseeded => {
                if let Some(stats) = self.stats.as_mut() {
                    stats.reset_cadence();
                }
            }
            FrameOutcome::Idle => {}
        }

        if let Some(canvas) = backdrop.surface() {
            paint_canvas(&painter, rect, canvas, theme.palette());
        }

        if let Some(stats) = &self.stats {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                stats.display_text(),
                FontId::monospace(12.0),
                overlay_text_color(theme == ThemeMode::Dark),
            );
        }

        if backdrop.pending_work() > 0 {
            ui.ctx().request_repaint();
        }
    }
}

impl eframe::App for BackdropApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        let now_ms = ctx.input(|input| input.time) * 1000.0;
        let theme = ThemeMode::from_dark_mode(ctx.style().visuals.dark_mode);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(ctx.style().visuals.panel_fill))
            .show(ctx, |ui| self.draw(ui, now_ms, theme));
    }
}

impl Drop for BackdropApp {
    fn drop(&mut self) {
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.dispose();
        }
    }
}
