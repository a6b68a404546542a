use std::ops::Range;

use crate::types::Rgb;

pub const RENDER_HZ: f32 = 60.0;

pub const DEFAULT_CAPACITY: usize = 30;

pub const SPAWN_SPEED: Range<f32> = -0.25..0.25;
pub const SPAWN_SIZE: Range<f32> = 1.0..3.0;
pub const SPAWN_OPACITY: Range<f32> = 0.2..0.7;
pub const SPAWN_LIFE: Range<f32> = 50.0..150.0;
pub const LIFE_STEP: f32 = 0.5;

pub const ACTIVATION_RADIUS: f32 = 200.0;
pub const ATTRACTION_STRENGTH: f32 = 0.02;
pub const DAMPING: f32 = 0.98;

pub const ACCENT: Rgb = Rgb::new(168, 85, 247);

pub const GLOW_ALPHA: f32 = 0.25;
pub const GLOW_SCALE: f32 = 2.0;

pub const PULSE_PERIOD_MS: f64 = 2000.0;
pub const PULSE_COUNT: usize = 3;
pub const PULSE_RADIUS: f32 = 3.0;
pub const PULSE_ALPHA: f32 = 0.5;

// Surface pixels covered by one terminal cell.
pub const PX_PER_COL: f32 = 4.0;
pub const PX_PER_ROW: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub capacity: usize,
    /// Fixed seed for the spawn random source; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            seed: None,
        }
    }
}
