pub mod framebuffer;
#[cfg(test)]
pub mod recording;

use crate::{
    config,
    scene::SceneInput,
    types::{Particle, Rgba, SurfaceSize, Vec2},
};

/// 2D drawing context the particle layer paints into.
pub trait Canvas {
    fn size(&self) -> SurfaceSize;
    fn resize(&mut self, size: SurfaceSize);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Radial gradient from `inner` at `center` to fully transparent at `radius`.
    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Rgba);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub particles: usize,
    pub edges: usize,
}

/// Paints one frame. Reads the pool and scene, never mutates them.
pub fn draw_frame(
    canvas: &mut impl Canvas,
    particles: &[Particle],
    scene: &SceneInput,
    bounds: SurfaceSize,
    now_ms: f64,
) -> FrameReport {
    canvas.clear();

    for p in particles {
        canvas.fill_circle(p.pos, p.size, config::ACCENT.with_alpha(p.opacity));
        canvas.radial_glow(
            p.pos,
            p.size * config::GLOW_SCALE,
            config::ACCENT.with_alpha(config::GLOW_ALPHA),
        );
    }

    let mut edges = 0;
    if scene.hover.is_some() {
        for edge in &scene.edges {
            let Some((from, to)) = scene.edge_points(edge, bounds) else {
                continue;
            };
            for point in pulse_points(from, to, now_ms) {
                canvas.fill_circle(
                    point,
                    config::PULSE_RADIUS,
                    config::ACCENT.with_alpha(config::PULSE_ALPHA),
                );
            }
            edges += 1;
        }
    }

    FrameReport {
        particles: particles.len(),
        edges,
    }
}

/// Phase in `[0,1)` of pulse `index` at wall-clock time `now_ms`.
pub fn pulse_phase(now_ms: f64, index: usize) -> f32 {
    let phase = now_ms / config::PULSE_PERIOD_MS + index as f64 / config::PULSE_COUNT as f64;
    phase.rem_euclid(1.0) as f32
}

pub fn pulse_points(from: Vec2, to: Vec2, now_ms: f64) -> [Vec2; config::PULSE_COUNT] {
    std::array::from_fn(|i| from.lerp(to, pulse_phase(now_ms, i)))
}
