//! Arm gesture modulator
//!
//! Holds the upper arms down from the T-pose, layers a breath-linked heave
//! and speech gestures on top, and eases toward the target each frame.

use crate::core::random::NoiseSource;
use crate::types::rotation::{euler_deg, slerp, smoothing_factor};
use crate::types::{ArmConfig, Rotation, Tick};

/// Noise rows for the per-side posture drift
const LEFT_DRIFT_ROW: f64 = 50.0;
const RIGHT_DRIFT_ROW: f64 = 60.0;

/// Smoothed arm offsets relative to rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmSample {
    pub left: Rotation,
    pub right: Rotation,
    /// Roll the left arm is easing toward, in degrees
    pub left_target_roll: f32,
    pub right_target_roll: f32,
}

#[derive(Debug, Clone)]
pub struct ArmGestureModulator {
    config: ArmConfig,
    left: Rotation,
    right: Rotation,
}

impl ArmGestureModulator {
    pub fn new(config: ArmConfig) -> Self {
        Self {
            config,
            left: Rotation::identity(),
            right: Rotation::identity(),
        }
    }

    pub fn advance(&mut self, tick: &Tick, noise: &NoiseSource) -> ArmSample {
        let c = &self.config;
        let t = tick.time;
        let heave = (t * f64::from(c.heave_speed)).sin() as f32 * c.heave_amplitude;
        let mut left_lift = heave;
        let mut right_lift = heave;

        if tick.is_speaking {
            let st = t * f64::from(c.gesture_frequency);
            left_lift += (noise.sample(st, 0.0) - c.gesture_bias) * c.gesture_amplitude;
            right_lift += (noise.sample(0.0, st) - c.gesture_bias) * c.gesture_amplitude;
        }

        let weight = if tick.is_speaking { c.speaking_weight } else { c.idle_weight };
        let dt_rate = t * f64::from(c.drift_rate);
        let left_drift = (noise.sample(dt_rate, LEFT_DRIFT_ROW) - 0.5) * c.drift_amplitude;
        let right_drift = (noise.sample(dt_rate, RIGHT_DRIFT_ROW) - 0.5) * c.drift_amplitude;

        // Left arm rolls positive to come down, right arm mirrors
        let left_target_roll = c.base_angle + left_drift - left_lift * weight;
        let right_target_roll = -c.base_angle - right_drift + right_lift * weight;

        let k = smoothing_factor(tick.dt, c.smoothing_rate);
        self.left = slerp(&self.left, &euler_deg(0.0, 0.0, left_target_roll), k);
        self.right = slerp(&self.right, &euler_deg(0.0, 0.0, right_target_roll), k);

        ArmSample {
            left: self.left,
            right: self.right,
            left_target_roll,
            right_target_roll,
        }
    }
}
