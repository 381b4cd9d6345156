use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Builtin scenes.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BuiltinScene {
    /// Ground plus diffuse, glass and metal spheres
    ThreeSpheres,
    /// Large feature spheres over a grid of small random ones
    Cover,
}

#[derive(Parser, Debug)]
#[command(name = "ember")]
#[command(about = "Monte Carlo path tracer for sphere scenes")]
pub struct Args {
    /// Builtin scene to render
    #[arg(long, value_enum, default_value = "three-spheres")]
    pub scene: BuiltinScene,

    /// JSON scene description (overrides --scene)
    #[arg(long)]
    pub scene_file: Option<PathBuf>,

    /// Image width in pixels (height follows the aspect ratio)
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum ray bounces
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Random seed; a fixed seed gives a reproducible image
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads: 1 renders serially, 0 uses every core
    #[arg(long, short = 't', default_value_t = 1)]
    pub threads: usize,

    /// Output file (.png or .tga)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Print the scene as JSON and exit without rendering
    #[arg(long)]
    pub dump_scene: bool,

    /// Logging verbosity (RUST_LOG still applies per module)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
