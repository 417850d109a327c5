use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_core::RenderSettings;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "lux")]
#[command(about = "A CPU path tracer for sphere scenes", version)]
pub struct Args {
    /// Built-in scene to render (three-spheres, materials, final)
    #[arg(long, default_value = "three-spheres", conflicts_with = "scene_file")]
    pub scene: String,

    /// JSON scene description to render instead of a built-in scene
    #[arg(long)]
    pub scene_file: Option<PathBuf>,

    /// Output image path; the extension selects the format (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Render seed; random when neither this nor the scene sets one
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Bucket edge length in pixels
    #[arg(long, default_value_t = lux_renderer::DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Logging level; overrides RUST_LOG when given
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Apply command-line overrides on top of scene settings.
    pub fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            settings.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
    }
}
