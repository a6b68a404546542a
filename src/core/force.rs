use crate::{config, types::Vec2};

/// Velocity delta pulling a particle at `pos` toward `target`.
///
/// Linear falloff: full `ATTRACTION_STRENGTH` at the target, zero at
/// `ACTIVATION_RADIUS` and beyond. A particle sitting exactly on the target
/// has no direction and receives no force.
pub fn attraction(pos: Vec2, target: Option<Vec2>) -> Vec2 {
    let Some(target) = target else {
        return Vec2::ZERO;
    };
    let delta = target - pos;
    let dist = delta.length();
    if dist >= config::ACTIVATION_RADIUS || dist <= 0.0 || !dist.is_finite() {
        return Vec2::ZERO;
    }
    let magnitude =
        (config::ACTIVATION_RADIUS - dist) / config::ACTIVATION_RADIUS * config::ATTRACTION_STRENGTH;
    delta * (magnitude / dist)
}
