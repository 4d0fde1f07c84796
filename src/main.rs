mod app;
mod backdrop;
mod config;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};

use backdrop::ThemeMode;
use config::BackdropConfig;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for ThemeMode {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::Light => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with tuning overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tick rate cap
    #[arg(long)]
    fps: Option<u32>,
    #[arg(long, value_enum, default_value = "dark")]
    theme: ThemeArg,
    /// Seed for reproducible particle layouts
    #[arg(long)]
    seed: Option<u64>,
    /// Show the tick rate overlay
    #[arg(long)]
    stats: bool,
}

impl Args {
    fn backdrop_config(&self) -> Result<BackdropConfig> {
        let mut config = match &self.config {
            Some(path) => BackdropConfig::load(path)?,
            None => BackdropConfig::default(),
        };
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config.validated())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.backdrop_config()?;
    let theme = ThemeMode::from(args.theme);
    let show_stats = args.stats;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Neural Backdrop"),
        ..Default::default()
    };

    eframe::run_native(
        "neural-backdrop",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BackdropApp::new(
                cc,
                config.clone(),
                theme,
                show_stats,
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to run window: {error}"))
}
