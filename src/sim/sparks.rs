//! Wall-impact spark particles
//!
//! Purely cosmetic, but they live inside the sled and advance on the same
//! tick as the physics. No spark depends on another, so removal order is free
//! and dead sparks are swap-removed in place.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sample::TrackSample;
use crate::consts::SPARK_BURST;

/// A single spark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
}

/// Active sparks, unordered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sparks {
    active: Vec<Spark>,
}

impl Sparks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spark> {
        self.active.iter()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Emit a burst at the wall contact point.
    ///
    /// `d` is the sled's (already clamped) lateral offset and `side` the wall
    /// sign; sparks fly outward through the wall and scatter randomly.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, at: &TrackSample, d: f32, side: f32) {
        let outward = at.lateral_dir();
        let contact = at.pos + outward * d;

        self.active.reserve(SPARK_BURST);
        for _ in 0..SPARK_BURST {
            let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 0.3;
            let scatter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 3.0;
            self.active.push(Spark {
                pos: contact + jitter,
                vel: scatter + outward * side * 2.0,
                life: 0.4 + rng.random::<f32>() * 0.3,
            });
        }
    }

    /// Integrate all sparks and drop the expired ones
    pub fn advance(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.active.len() {
            let spark = &mut self.active[i];
            spark.pos += spark.vel * dt;
            spark.life -= dt;
            if spark.life <= 0.0 {
                // Swapped-in spark is unvisited; re-check index i
                self.active.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sample() -> TrackSample {
        TrackSample {
            pos: Vec2::new(10.0, 5.0),
            heading: 0.0,
            curvature: 0.0,
        }
    }

    #[test]
    fn test_spawn_burst_at_wall() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut sparks = Sparks::new();
        sparks.spawn(&mut rng, &sample(), 2.9, 1.0);

        assert_eq!(sparks.len(), SPARK_BURST);
        // Heading 0 → lateral direction is +y, wall at y = 5 + 2.9
        for s in sparks.iter() {
            assert!((s.pos.x - 10.0).abs() <= 0.15 + 1e-5);
            assert!((s.pos.y - 7.9).abs() <= 0.15 + 1e-5);
            assert!(s.life >= 0.4 && s.life <= 0.7);
            // Outward bias of 2 dominates the ±1.5 scatter
            assert!(s.vel.y > 0.0);
        }
    }

    #[test]
    fn test_advance_prunes_expired() {
        let mut sparks = Sparks::new();
        for life in [0.05, 0.5, 0.02, 0.3, 0.01] {
            sparks.active.push(Spark {
                pos: Vec2::ZERO,
                vel: Vec2::new(1.0, 0.0),
                life,
            });
        }

        sparks.advance(0.1);
        assert_eq!(sparks.len(), 2);
        for s in sparks.iter() {
            assert!(s.life > 0.0);
            assert!((s.pos.x - 0.1).abs() < 1e-6);
        }

        sparks.advance(1.0);
        assert!(sparks.is_empty());
    }

    #[test]
    fn test_spawn_deterministic_for_seed() {
        let mut a = Sparks::new();
        let mut b = Sparks::new();
        a.spawn(&mut Pcg32::seed_from_u64(42), &sample(), -2.9, -1.0);
        b.spawn(&mut Pcg32::seed_from_u64(42), &sample(), -2.9, -1.0);
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x == y));
    }
}
