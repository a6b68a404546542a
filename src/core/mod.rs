pub mod force;
pub mod integrate;
pub mod pool;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::SimConfig,
    scene::SceneInput,
    types::{Particle, SurfaceSize},
};

use self::{integrate::StepOutcome, pool::ParticlePool};

/// Whole simulation state for one activation: the pool, the bounds it wraps
/// against, and the random source used for spawning.
pub struct Simulation<R: Rng = StdRng> {
    pool: ParticlePool,
    bounds: SurfaceSize,
    rng: R,
}

impl Simulation<StdRng> {
    pub fn from_config(config: &SimConfig, bounds: SurfaceSize) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config.capacity, bounds, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(capacity: usize, bounds: SurfaceSize, mut rng: R) -> Self {
        let mut pool = ParticlePool::new();
        pool.initialize(capacity, &mut rng, bounds);
        Self { pool, bounds, rng }
    }

    pub fn with_particles(particles: Vec<Particle>, bounds: SurfaceSize, rng: R) -> Self {
        Self {
            pool: ParticlePool::from_particles(particles),
            bounds,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.as_slice()
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    /// Existing positions are kept; they wrap against the new bounds from the next tick.
    pub fn set_bounds(&mut self, bounds: SurfaceSize) {
        self.bounds = bounds;
    }

    /// One full pass over the pool. Returns how many particles were respawned.
    pub fn tick(&mut self, scene: &SceneInput) -> usize {
        let target = scene.hover_point(self.bounds);
        let mut respawned = 0;
        for idx in 0..self.pool.len() {
            let particle = self.pool.get_mut(idx);
            let delta = force::attraction(particle.pos, target);
            if integrate::step(particle, delta, self.bounds) == StepOutcome::Expired {
                self.pool.respawn(idx, &mut self.rng, self.bounds);
                respawned += 1;
            }
        }
        respawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config, types::Vec2};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn bounds() -> SurfaceSize {
        SurfaceSize::new(800.0, 600.0)
    }

    fn hovered_center() -> SceneInput {
        let mut scene = SceneInput::default();
        scene.positions.insert("center".into(), Vec2::new(50.0, 50.0));
        scene.hover = Some("center".into());
        scene
    }

    mod population {
        use super::*;

        #[test]
        fn stays_constant_every_tick() {
            let mut sim = Simulation::new(30, bounds(), rng());
            let scene = hovered_center();
            for _ in 0..400 {
                assert_eq!(sim.particles().len(), 30);
                sim.tick(&scene);
                assert_eq!(sim.particles().len(), 30);
            }
        }

        #[test]
        fn from_config_uses_capacity() {
            let config = SimConfig {
                capacity: 12,
                seed: Some(3),
            };
            let sim = Simulation::from_config(&config, bounds());
            assert_eq!(sim.particles().len(), 12);
        }

        #[test]
        fn same_seed_same_trajectory() {
            let config = SimConfig {
                capacity: 8,
                seed: Some(99),
            };
            let mut a = Simulation::from_config(&config, bounds());
            let mut b = Simulation::from_config(&config, bounds());
            let scene = SceneInput::default();
            for _ in 0..250 {
                a.tick(&scene);
                b.tick(&scene);
            }
            assert_eq!(a.particles(), b.particles());
        }
    }

    mod idle {
        use super::*;

        #[test]
        fn drift_stays_in_bounds_for_1000_ticks() {
            let mut sim = Simulation::new(30, bounds(), rng());
            let scene = SceneInput::default();
            for _ in 0..1000 {
                sim.tick(&scene);
                for p in sim.particles() {
                    assert!((0.0..800.0).contains(&p.pos.x), "x = {}", p.pos.x);
                    assert!((0.0..600.0).contains(&p.pos.y), "y = {}", p.pos.y);
                }
            }
            assert_eq!(sim.particles().len(), 30);
        }

        #[test]
        fn speed_never_grows_for_surviving_particles() {
            let mut sim = Simulation::new(30, bounds(), rng());
            let scene = SceneInput::default();
            for _ in 0..300 {
                let before: Vec<Particle> = sim.particles().to_vec();
                sim.tick(&scene);
                for (old, new) in before.iter().zip(sim.particles()) {
                    if old.life - config::LIFE_STEP <= 0.0 {
                        continue;
                    }
                    let (v0, v1) = (old.vel.length(), new.vel.length());
                    if v0 > 0.0 {
                        assert!(v1 < v0);
                    } else {
                        assert_eq!(v1, 0.0);
                    }
                }
            }
        }

        #[test]
        fn unknown_hover_behaves_like_idle() {
            let mut idle = Simulation::new(10, bounds(), rng());
            let mut ghost = Simulation::new(10, bounds(), rng());
            let ghost_scene = SceneInput {
                hover: Some("nobody".into()),
                ..SceneInput::default()
            };
            for _ in 0..50 {
                idle.tick(&SceneInput::default());
                ghost.tick(&ghost_scene);
            }
            assert_eq!(idle.particles(), ghost.particles());
        }
    }

    mod life {
        use super::*;

        #[test]
        fn decreases_by_step_until_replaced() {
            let mut sim = Simulation::new(30, bounds(), rng());
            let scene = SceneInput::default();
            for _ in 0..400 {
                let before: Vec<f32> = sim.particles().iter().map(|p| p.life).collect();
                sim.tick(&scene);
                for (old, new) in before.iter().zip(sim.particles()) {
                    if old - config::LIFE_STEP <= 0.0 {
                        assert!(config::SPAWN_LIFE.contains(&new.life));
                    } else {
                        assert!((old - new.life - config::LIFE_STEP).abs() < 1e-4);
                    }
                }
            }
        }

        #[test]
        fn tick_reports_respawns() {
            let particles = vec![
                Particle {
                    pos: Vec2::new(10.0, 10.0),
                    vel: Vec2::ZERO,
                    size: 1.0,
                    opacity: 0.5,
                    life: 0.5,
                },
                Particle {
                    pos: Vec2::new(20.0, 20.0),
                    vel: Vec2::ZERO,
                    size: 1.0,
                    opacity: 0.5,
                    life: 10.0,
                },
            ];
            let mut sim = Simulation::with_particles(particles, bounds(), rng());
            assert_eq!(sim.tick(&SceneInput::default()), 1);
            assert!(config::SPAWN_LIFE.contains(&sim.particles()[0].life));
            assert_eq!(sim.particles()[1].life, 9.5);
        }
    }

    mod attraction {
        use super::*;

        #[test]
        fn particle_converges_toward_hovered_target() {
            let center = bounds().center();
            let start = center + Vec2::new(150.0, 0.0);
            let particle = Particle {
                pos: start,
                vel: Vec2::ZERO,
                size: 2.0,
                opacity: 0.5,
                life: 1000.0,
            };
            let mut sim = Simulation::with_particles(vec![particle], bounds(), rng());
            let scene = hovered_center();
            for _ in 0..500 {
                sim.tick(&scene);
            }
            let p = sim.particles()[0];
            assert!(p.pos.is_finite());
            assert!(p.pos.distance(center) < start.distance(center));
        }

        #[test]
        fn resized_bounds_apply_to_wrapping() {
            let particle = Particle {
                pos: Vec2::new(700.0, 500.0),
                vel: Vec2::ZERO,
                size: 2.0,
                opacity: 0.5,
                life: 100.0,
            };
            let mut sim = Simulation::with_particles(vec![particle], bounds(), rng());
            sim.set_bounds(SurfaceSize::new(400.0, 300.0));
            sim.tick(&SceneInput::default());
            let p = sim.particles()[0];
            assert!(p.pos.x < 400.0 && p.pos.y < 300.0);
        }
    }
}
