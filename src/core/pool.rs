use rand::Rng;

use crate::{
    config,
    types::{Particle, SurfaceSize, Vec2},
};

/// Fixed-capacity particle storage. Particles are only ever replaced in
/// place, so the population never changes after `initialize`.
#[derive(Debug, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn initialize(&mut self, n: usize, rng: &mut impl Rng, bounds: SurfaceSize) {
        self.particles.clear();
        self.particles.reserve_exact(n);
        for _ in 0..n {
            self.particles.push(spawn(rng, bounds));
        }
    }

    pub fn respawn(&mut self, idx: usize, rng: &mut impl Rng, bounds: SurfaceSize) {
        self.particles[idx] = spawn(rng, bounds);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Particle {
        &mut self.particles[idx]
    }
}

pub fn spawn(rng: &mut impl Rng, bounds: SurfaceSize) -> Particle {
    Particle {
        pos: Vec2::new(
            uniform_extent(rng, bounds.width),
            uniform_extent(rng, bounds.height),
        ),
        vel: Vec2::new(
            rng.gen_range(config::SPAWN_SPEED),
            rng.gen_range(config::SPAWN_SPEED),
        ),
        size: rng.gen_range(config::SPAWN_SIZE),
        opacity: rng.gen_range(config::SPAWN_OPACITY),
        life: rng.gen_range(config::SPAWN_LIFE),
    }
}

// gen_range panics on an empty range, which a collapsed surface would produce.
fn uniform_extent(rng: &mut impl Rng, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    mod spawn_fn {
        use super::*;

        #[test]
        fn fields_lie_in_spawn_ranges() {
            let mut rng = rng();
            let bounds = SurfaceSize::new(640.0, 480.0);
            for _ in 0..1000 {
                let p = spawn(&mut rng, bounds);
                assert!((0.0..640.0).contains(&p.pos.x));
                assert!((0.0..480.0).contains(&p.pos.y));
                assert!(config::SPAWN_SPEED.contains(&p.vel.x));
                assert!(config::SPAWN_SPEED.contains(&p.vel.y));
                assert!(config::SPAWN_SIZE.contains(&p.size));
                assert!(config::SPAWN_OPACITY.contains(&p.opacity));
                assert!(config::SPAWN_LIFE.contains(&p.life));
            }
        }

        #[test]
        fn collapsed_surface_spawns_at_origin() {
            let p = spawn(&mut rng(), SurfaceSize::new(0.0, 0.0));
            assert_eq!(p.pos, Vec2::ZERO);
        }
    }

    mod initialize {
        use super::*;

        #[test]
        fn populates_exactly_n() {
            let mut pool = ParticlePool::new();
            pool.initialize(30, &mut rng(), SurfaceSize::new(100.0, 100.0));
            assert_eq!(pool.len(), 30);
        }

        #[test]
        fn reinitialize_replaces_population() {
            let mut pool = ParticlePool::new();
            let bounds = SurfaceSize::new(100.0, 100.0);
            pool.initialize(30, &mut rng(), bounds);
            pool.initialize(5, &mut rng(), bounds);
            assert_eq!(pool.len(), 5);
        }
    }

    mod respawn {
        use super::*;

        #[test]
        fn replaces_in_place_keeping_population() {
            let mut rng = rng();
            let bounds = SurfaceSize::new(100.0, 100.0);
            let mut pool = ParticlePool::new();
            pool.initialize(3, &mut rng, bounds);
            pool.get_mut(1).life = -1.0;
            let before_first = pool.as_slice()[0];
            pool.respawn(1, &mut rng, bounds);
            assert_eq!(pool.len(), 3);
            assert_eq!(pool.as_slice()[0], before_first);
            assert!(config::SPAWN_LIFE.contains(&pool.as_slice()[1].life));
        }
    }
}
