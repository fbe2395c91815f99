//! Sway oscillator: noise-driven spine and chest lean

use crate::core::random::NoiseSource;
use crate::types::rotation::euler_deg;
use crate::types::{AxisWeights, Rotation, SwayConfig, Tick};

/// Offsets produced by one sway step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwaySample {
    pub spine: Rotation,
    pub chest: Rotation,
    /// `spine * chest`, consumed by the head stabilizer this frame
    pub cumulative: Rotation,
    pub magnitude: f32,
}

impl SwaySample {
    /// No sway at all
    pub fn still() -> Self {
        Self {
            spine: Rotation::identity(),
            chest: Rotation::identity(),
            cumulative: Rotation::identity(),
            magnitude: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwayOscillator {
    config: SwayConfig,
}

impl SwayOscillator {
    pub fn new(config: SwayConfig) -> Self {
        Self { config }
    }

    pub fn advance(&self, tick: &Tick, noise: &NoiseSource) -> SwaySample {
        let c = &self.config;
        let t = tick.time * f64::from(c.speed);
        let yaw = noise.signed(t, 0.0);
        let roll = noise.signed(0.0, t);
        let pitch = noise.signed(t, t);

        let mut magnitude = c.base_magnitude * (0.5 + 0.5 * tick.arousal);
        if tick.is_speaking {
            magnitude *= c.speaking_boost;
        }

        let offset = |w: &AxisWeights| {
            euler_deg(
                pitch * magnitude * w.pitch,
                yaw * magnitude * w.yaw,
                roll * magnitude * w.roll,
            )
        };
        let spine = offset(&c.spine_weights);
        let chest = offset(&c.chest_weights);

        SwaySample {
            spine,
            chest,
            cumulative: spine * chest,
            magnitude,
        }
    }
}
