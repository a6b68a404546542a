use crate::{
    config,
    types::{Particle, SurfaceSize, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Alive,
    Expired,
}

/// Advances one particle by one tick. The caller replaces `Expired` particles.
pub fn step(particle: &mut Particle, delta: Vec2, bounds: SurfaceSize) -> StepOutcome {
    particle.vel += delta;
    particle.vel *= config::DAMPING;
    particle.pos += particle.vel;
    particle.pos.x = wrap_axis(particle.pos.x, bounds.width);
    particle.pos.y = wrap_axis(particle.pos.y, bounds.height);
    particle.life -= config::LIFE_STEP;
    if particle.life <= 0.0 {
        StepOutcome::Expired
    } else {
        StepOutcome::Alive
    }
}

/// Toroidal wrap of one coordinate into `[0, extent)`.
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid may round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}
