use std::collections::VecDeque;

use crate::backdrop::FrameStats;

const TICK_SAMPLE_WINDOW: usize = 180;

#[derive(Default)]
pub(super) struct TickStats {
    last_tick_ms: Option<f64>,
    current: f32,
    samples: VecDeque<f32>,
    frame: FrameStats,
}

impl TickStats {
    pub(super) fn record_tick(&mut self, now_ms: f64, frame: FrameStats) {
        self.frame = frame;
        let previous = self.last_tick_ms.replace(now_ms);
        let Some(previous) = previous else {
            return;
        };

        let dt = now_ms - previous;
        if dt <= f64::EPSILON {
            return;
        }

        self.current = (1000.0 / dt).clamp(0.0, 1000.0) as f32;
        self.samples.push_back(self.current);
        while self.samples.len() > TICK_SAMPLE_WINDOW {
            self.samples.pop_front();
        }
    }

    /// Forget the tick cadence after a reseed so the gap does not show up as a dip.
    pub(super) fn reset_cadence(&mut self) {
        self.last_tick_ms = None;
        self.frame = FrameStats::default();
    }

    pub(super) fn display_text(&self) -> String {
        let mut parts = vec![format!("ticks {:.0}/s", self.current)];

        if !self.samples.is_empty() {
            let avg = self.samples.iter().sum::<f32>() / self.samples.len() as f32;
            parts.push(format!("avg {avg:.1}"));
        }

        if let Some(low) = self.samples.iter().copied().reduce(f32::min) {
            parts.push(format!("low {low:.0}"));
        }

        parts.push(format!(
            "{} nodes / {} edges / {} lit",
            self.frame.nodes, self.frame.edges, self.frame.highlights
        ));
        parts.join(" | ")
    }
}
