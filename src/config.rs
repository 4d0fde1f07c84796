use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub target_fps: u32,
    pub max_nodes: usize,
    pub area_per_node: f32,
    pub link_distance: f32,
    pub pointer_radius: f32,
    pub neighbor_window: usize,
    pub resize_debounce_ms: f64,
    pub trail_alpha: f32,
    pub trail_cutoff: f32,
    pub highlight_threshold: f32,
    pub sweep_period_ms: f64,
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            max_nodes: 150,
            area_per_node: 8000.0,
            link_distance: 200.0,
            pointer_radius: 120.0,
            neighbor_window: 20,
            resize_debounce_ms: 300.0,
            trail_alpha: 0.15,
            trail_cutoff: 0.04,
            highlight_threshold: 0.3,
            sweep_period_ms: 1000.0,
            seed: None,
        }
    }
}

impl BackdropConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON in config file {}", path.display()))?;
        Ok(config.validated())
    }

    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }

    /// Replaces values the simulation cannot work with by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.target_fps == 0 {
            log::warn!("target_fps must be positive, using 1");
            self.target_fps = 1;
        }
        if !(self.area_per_node > 0.0) {
            log::warn!(
                "area_per_node {} is not positive, using {}",
                self.area_per_node,
                defaults.area_per_node
            );
            self.area_per_node = defaults.area_per_node;
        }
        if !(self.link_distance > 0.0) {
            log::warn!(
                "link_distance {} is not positive, using {}",
                self.link_distance,
                defaults.link_distance
            );
            self.link_distance = defaults.link_distance;
        }
        if !(self.pointer_radius > 0.0) {
            log::warn!(
                "pointer_radius {} is not positive, using {}",
                self.pointer_radius,
                defaults.pointer_radius
            );
            self.pointer_radius = defaults.pointer_radius;
        }
        // A zero wash alpha or cutoff would keep every trail layer forever.
        if !(self.trail_alpha > 0.0) {
            log::warn!(
                "trail_alpha {} is not positive, using {}",
                self.trail_alpha,
                defaults.trail_alpha
            );
            self.trail_alpha = defaults.trail_alpha;
        } else if self.trail_alpha > 1.0 {
            log::warn!("trail_alpha {} above 1, clamping", self.trail_alpha);
            self.trail_alpha = 1.0;
        }
        if !(self.trail_cutoff > 0.0 && self.trail_cutoff < 1.0) {
            log::warn!("trail_cutoff {} outside (0, 1), using default", self.trail_cutoff);
            self.trail_cutoff = defaults.trail_cutoff;
        }
        if self.neighbor_window > self.max_nodes {
            log::warn!(
                "neighbor_window {} exceeds max_nodes, using {}",
                self.neighbor_window,
                self.max_nodes
            );
            self.neighbor_window = self.max_nodes;
        }
        if !(self.resize_debounce_ms >= 0.0) {
            log::warn!("resize_debounce_ms {} is negative, using 0", self.resize_debounce_ms);
            self.resize_debounce_ms = 0.0;
        }
        if !(self.sweep_period_ms > 0.0) {
            log::warn!(
                "sweep_period_ms {} is not positive, using {}",
                self.sweep_period_ms,
                defaults.sweep_period_ms
            );
            self.sweep_period_ms = defaults.sweep_period_ms;
        }

        self
    }
}
