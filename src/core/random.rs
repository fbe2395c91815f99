//! Seedable randomness: coherent 2D noise plus a uniform RNG
//!
//! Both are owned by the engine and injected into the generators, so a
//! fixed pair of seeds reproduces a run bit for bit.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{ProbabilityTable, Range};

/// Seeded 2D Perlin noise returning values in [0, 1]
#[derive(Debug, Clone, Copy)]
pub struct NoiseSource {
    seed: u64,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Coherent noise in [0, 1]; 0.5 on every lattice point
    ///
    /// Coordinates are `f64` so the fractional part stays exact on
    /// clocks that have run for days.
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        (perlin_2d(x, y, self.seed) * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// Coherent noise remapped to [-1, 1]
    pub fn signed(&self, x: f64, y: f64) -> f32 {
        (self.sample(x, y) - 0.5) * 2.0
    }
}

fn hash_2d(x: i64, y: i64, seed: u64) -> u64 {
    let mut h = seed;
    h = h.wrapping_add(x as u64).wrapping_mul(6364136223846793005);
    h = h.wrapping_add(y as u64).wrapping_mul(6364136223846793005);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h
}

fn grad_dot(hash: u64, fx: f32, fy: f32) -> f32 {
    match hash & 3 {
        0 => fx + fy,
        1 => -fx + fy,
        2 => fx - fy,
        _ => -fx - fy,
    }
}

fn perlin_2d(x: f64, y: f64, seed: u64) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    let (xf, yf) = (x.floor(), y.floor());
    let x0 = xf as i64;
    let y0 = yf as i64;
    // Narrow only the in-cell offset
    let fx = (x - xf) as f32;
    let fy = (y - yf) as f32;

    // Quintic fade keeps the derivative continuous across cells
    let u = fx * fx * fx * (fx * (fx * 6.0 - 15.0) + 10.0);
    let v = fy * fy * fy * (fy * (fy * 6.0 - 15.0) + 10.0);

    let n00 = grad_dot(hash_2d(x0, y0, seed), fx, fy);
    let n10 = grad_dot(hash_2d(x0.wrapping_add(1), y0, seed), fx - 1.0, fy);
    let n01 = grad_dot(hash_2d(x0, y0.wrapping_add(1), seed), fx, fy - 1.0);
    let n11 = grad_dot(hash_2d(x0.wrapping_add(1), y0.wrapping_add(1), seed), fx - 1.0, fy - 1.0);

    let nx0 = n00 + u * (n10 - n00);
    let nx1 = n01 + u * (n11 - n01);
    nx0 + v * (nx1 - nx0)
}

/// Uniform random draws for timers and weighted branches
#[derive(Debug, Clone)]
pub struct MotionRng {
    rng: ChaCha8Rng,
}

impl MotionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform in [0, 1)
    pub fn value(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform between `min` and `max`; `min == max` returns `min`
    pub fn between(&mut self, min: f32, max: f32) -> f32 {
        min + self.value() * (max - min)
    }

    pub fn range(&mut self, range: Range) -> f32 {
        self.between(range.min, range.max)
    }

    /// +1 or -1 with equal probability
    pub fn sign(&mut self) -> f32 {
        if self.value() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    /// Uniform in [-amount, amount)
    pub fn symmetric(&mut self, amount: f32) -> f32 {
        (self.value() - 0.5) * 2.0 * amount
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.value() < probability
    }

    pub fn pick<T: Copy>(&mut self, table: &ProbabilityTable<T>) -> Option<T> {
        let r = self.value();
        table.pick(r)
    }
}
