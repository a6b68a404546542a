use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{self, SimConfig};

#[derive(Parser, Debug)]
#[command(
    name = "relpulse",
    version,
    about = "Character relationship view with an ambient particle layer"
)]
pub struct Cli {
    /// Number of ambient particles
    #[arg(long, default_value_t = config::DEFAULT_CAPACITY)]
    pub particles: usize,

    /// Seed for particle spawning (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second
    #[arg(long, default_value_t = config::RENDER_HZ, value_parser = parse_fps)]
    pub fps: f32,

    /// JSON cast file with characters and relationships
    #[arg(long, value_name = "FILE")]
    pub cast: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            capacity: self.particles,
            seed: self.seed,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn parse_fps(raw: &str) -> Result<f32, String> {
    let fps: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if fps.is_finite() && fps > 0.0 && fps <= 240.0 {
        Ok(fps)
    } else {
        Err("fps must be in (0, 240]".to_string())
    }
}
