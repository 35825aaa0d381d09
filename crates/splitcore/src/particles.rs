use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Particles that drift further than this on x or z are recycled.
pub const BOUND_XZ: f32 = 8.0;
/// Particles that fall below this height are recycled.
pub const FLOOR_Y: f32 = -5.0;

/// Kinematic parameters fixed at pool creation. Only the derived position
/// array ever changes after seeding.
#[derive(Debug, Clone, Copy)]
struct Particle {
    initial_position: Vec3,
    velocity: Vec3,
    gravity: f32,
    life: f32,
    swirl: f32,
}

/// Fixed-size pool of eruption particles. The pool never grows or shrinks;
/// out-of-bounds particles are reset to their spawn point instead of being
/// removed. Reseeding means recreating the pool.
pub struct ParticlePool {
    particles: Vec<Particle>,
    positions: Vec<Vec3>,
}

impl ParticlePool {
    /// Seed `count` particles on a sphere of `spawn_radius`, each with a
    /// randomized outward velocity whose vertical component is biased
    /// upward by `upward_bias` (only for spawn directions above the
    /// equator, via max(cos theta, 0)).
    pub fn new(count: usize, spawn_radius: f32, upward_bias: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut particles = Vec::with_capacity(count);
        let mut positions = Vec::with_capacity(count);

        for _ in 0..count {
            let theta: f32 = rng.random_range(0.0..PI);
            let phi: f32 = rng.random_range(0.0..TAU);
            let speed: f32 = rng.random_range(2.0..7.0);

            let dir = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let velocity = Vec3::new(
                dir.x * speed,
                dir.y.max(0.0) * upward_bias * speed,
                dir.z * speed,
            );

            let initial_position = dir * spawn_radius;
            particles.push(Particle {
                initial_position,
                velocity,
                gravity: rng.random_range(-4.0..-1.5),
                life: rng.random_range(0.6..1.4),
                swirl: rng.random_range(0.2..1.0),
            });
            positions.push(initial_position);
        }

        Self {
            particles,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Advance every particle one frame.
    ///
    /// Eruption regime: ballistic position recomputed from scratch off
    /// `progress * life`, plus periodic turbulence, with out-of-bounds
    /// recycling back to the spawn point. Reassembly regime: the current
    /// position is pulled toward the origin by a fixed fraction per frame
    /// (vertical pull slower than horizontal) with a small spiral drift.
    pub fn update(&mut self, elapsed: f32, progress: f32, reassembling: bool) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        if reassembling {
            self.update_reassembly(elapsed);
        } else {
            self.update_eruption(elapsed, progress);
        }
    }

    fn update_eruption(&mut self, elapsed: f32, progress: f32) {
        for (i, p) in self.particles.iter().enumerate() {
            let t = progress * p.life;
            let mut pos = p.initial_position
                + p.velocity * t
                + Vec3::Y * (0.5 * p.gravity * t * t);

            // Turbulence keyed off time and particle index so the burst
            // doesn't read as a rigid shell.
            let wobble = elapsed * 1.7 + i as f32 * 0.13;
            pos.x += wobble.sin() * p.swirl * 0.15 * progress;
            pos.z += wobble.cos() * p.swirl * 0.15 * progress;
            pos.y += (elapsed * 2.3 + i as f32 * 0.07).sin() * p.swirl * 0.08 * progress;

            if pos.x.abs() > BOUND_XZ || pos.z.abs() > BOUND_XZ || pos.y < FLOOR_Y {
                pos = p.initial_position;
            }
            self.positions[i] = pos;
        }
    }

    fn update_reassembly(&mut self, elapsed: f32) {
        const PULL_RATE: f32 = 0.05;
        const VERTICAL_PULL_RATE: f32 = 0.02;

        for (i, p) in self.particles.iter().enumerate() {
            let pos = &mut self.positions[i];
            pos.x *= 1.0 - PULL_RATE;
            pos.z *= 1.0 - PULL_RATE;
            pos.y *= 1.0 - VERTICAL_PULL_RATE;

            // Tangential drift so the collapse spirals instead of imploding
            // along straight lines.
            let spiral = p.swirl * 0.02;
            let (x, z) = (pos.x, pos.z);
            pos.x += -z * spiral + (elapsed * 3.0 + i as f32 * 0.11).sin() * 0.005;
            pos.z += x * spiral;
        }
    }
}

/// Rendered point size for the current state of the split. A scalar for the
/// renderer; the pool itself has no notion of pixels.
pub fn point_size(progress: f32, reassembling: bool) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    if reassembling {
        0.02 + 0.03 * progress
    } else {
        0.02 + 0.05 * progress
    }
}

/// Rendered opacity for the current state of the split.
pub fn opacity(progress: f32, reassembling: bool) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    if reassembling {
        0.6 * progress
    } else {
        0.9 * progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_is_fixed_across_updates() {
        let mut pool = ParticlePool::new(500, 2.0, 2.0, 7);
        assert_eq!(pool.len(), 500);
        for frame in 0..120 {
            let progress = (frame as f32 / 60.0).min(1.0);
            pool.update(frame as f32 / 60.0, progress, false);
            assert_eq!(pool.positions().len(), 500);
        }
    }

    #[test]
    fn fallen_particle_resets_to_initial_position() {
        let initial = Vec3::new(0.5, 1.0, 0.5);
        let mut pool = ParticlePool {
            particles: vec![Particle {
                initial_position: initial,
                velocity: Vec3::ZERO,
                gravity: -20.0,
                life: 1.0,
                // zero swirl keeps the turbulence terms out of the way
                swirl: 0.0,
            }],
            positions: vec![initial],
        };

        // At full progress this particle's ballistic y is 1 - 10 = -9,
        // well below the floor, so the update must recycle it.
        pool.update(0.0, 1.0, false);
        assert_eq!(pool.positions()[0], initial);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn all_positions_stay_in_bounds_or_at_spawn() {
        let mut pool = ParticlePool::new(2000, 2.0, 2.0, 42);
        pool.update(1.0, 1.0, false);
        for (i, pos) in pool.positions().iter().enumerate() {
            let recycled = *pos == pool.particles[i].initial_position;
            let in_bounds =
                pos.x.abs() <= BOUND_XZ && pos.z.abs() <= BOUND_XZ && pos.y >= FLOOR_Y;
            assert!(recycled || in_bounds, "particle {i} escaped at {pos:?}");
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let mut pool = ParticlePool::new(100, 2.0, 2.0, 3);
        pool.update(0.5, 4.0, false);
        let exaggerated: Vec<Vec3> = pool.positions().to_vec();
        pool.update(0.5, 1.0, false);
        assert_eq!(exaggerated, pool.positions());

        // NaN progress must not poison positions
        pool.update(0.5, f32::NAN, false);
        assert!(pool.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn reassembly_pulls_particles_toward_origin() {
        let mut pool = ParticlePool::new(300, 2.0, 2.0, 11);
        pool.update(1.0, 1.0, false);
        let before: f32 = pool.positions().iter().map(|p| p.length()).sum();

        for frame in 0..200 {
            pool.update(1.0 + frame as f32 / 60.0, 0.5, true);
        }
        let after: f32 = pool.positions().iter().map(|p| p.length()).sum();
        assert!(after < before * 0.2, "collapse too slow: {after} vs {before}");
    }

    #[test]
    fn vertical_decay_is_slower_than_horizontal() {
        let mut pool = ParticlePool {
            particles: vec![Particle {
                initial_position: Vec3::ZERO,
                velocity: Vec3::ZERO,
                gravity: 0.0,
                life: 1.0,
                swirl: 0.0,
            }],
            positions: vec![Vec3::new(4.0, 4.0, 0.0)],
        };
        pool.update(0.0, 1.0, true);
        let pos = pool.positions()[0];
        assert!(pos.y > pos.x);
    }

    #[test]
    fn identical_seeds_produce_identical_pools() {
        let a = ParticlePool::new(64, 2.0, 2.0, 99);
        let b = ParticlePool::new(64, 2.0, 2.0, 99);
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn size_and_opacity_scale_with_progress() {
        assert!(point_size(1.0, false) > point_size(0.0, false));
        assert_eq!(opacity(0.0, false), 0.0);
        assert!(opacity(1.0, false) <= 1.0);
        assert!(opacity(2.0, false) == opacity(1.0, false));
    }
}
