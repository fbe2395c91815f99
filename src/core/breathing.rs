//! Breathing oscillator: a noise-modulated phase driving chest pitch

use std::f32::consts::TAU;

use crate::core::random::NoiseSource;
use crate::types::rotation::euler_deg;
use crate::types::{BreathingConfig, Rotation, Tick};

/// Chest heave from a phase accumulator
#[derive(Debug, Clone)]
pub struct BreathingOscillator {
    config: BreathingConfig,
    /// Phase in radians, kept within [0, TAU)
    phase: f32,
    rate: f32,
    pitch: f32,
}

impl BreathingOscillator {
    pub fn new(config: BreathingConfig) -> Self {
        Self {
            config,
            phase: 0.0,
            rate: 0.0,
            pitch: 0.0,
        }
    }

    /// Advance one frame and return the chest offset
    pub fn advance(&mut self, tick: &Tick, noise: &NoiseSource) -> Rotation {
        let c = &self.config;
        let t = tick.time * f64::from(c.noise_rate);
        let speed_mod = noise.sample(t, 0.0) + 0.5;
        let intensity_mod = noise.sample(0.0, t) + 0.5;

        let mut rate = c.base_speed * speed_mod * (0.8 + 0.5 * tick.arousal);
        if tick.is_speaking {
            rate *= c.speaking_boost;
        }
        self.phase = (self.phase + tick.dt * rate).rem_euclid(TAU);

        let expansion = (self.phase.sin() + 1.0) / 2.0;
        let intensity = c.base_intensity * intensity_mod * (0.5 + 0.5 * tick.arousal);

        self.rate = rate;
        self.pitch = expansion * intensity;
        euler_deg(self.pitch, 0.0, 0.0)
    }

    /// Phase rate of the last frame (radians per second)
    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Chest pitch of the last frame in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Bounds on `rate` for the given signals, from the [0.5, 1.5] noise span
    pub fn rate_bounds(&self, arousal: f32, is_speaking: bool) -> (f32, f32) {
        let boost = if is_speaking { self.config.speaking_boost } else { 1.0 };
        let scale = self.config.base_speed * (0.8 + 0.5 * arousal) * boost;
        (0.5 * scale, 1.5 * scale)
    }
}

// =============================================================================
// TESTS
// =============================================================================
