//! Head motion composer
//!
//! Four layers multiplied in a fixed order onto the rest pose:
//! stabilization (partial inverse of torso sway), speech saccade,
//! natural drift, and speech jitter.

use tracing::debug;

use crate::core::random::{MotionRng, NoiseSource};
use crate::core::speech::SpeechSample;
use crate::types::rotation::{self, euler_deg, slerp};
use crate::types::{HeadConfig, HeadSaccadeKind, Rotation, Tick};

/// Every layer of one head step, plus their product
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadSample {
    pub stabilization: Rotation,
    pub saccade: Rotation,
    pub drift: Rotation,
    pub jitter: Rotation,
    /// `stabilization * saccade * drift * jitter`
    pub offset: Rotation,
    pub jitter_magnitude: f32,
}

#[derive(Debug, Clone)]
pub struct HeadMotionComposer {
    config: HeadConfig,
    saccade_offset: Rotation,
    saccade_target: Rotation,
    saccade_timer: f32,
    saccade_speed: f32,
    last_saccade: Option<HeadSaccadeKind>,
    saccades: u32,
}

impl HeadMotionComposer {
    pub fn new(config: HeadConfig) -> Self {
        let speed = config.saccade.idle_return_speed;
        Self {
            config,
            saccade_offset: Rotation::identity(),
            saccade_target: Rotation::identity(),
            saccade_timer: 0.0,
            saccade_speed: speed,
            last_saccade: None,
            saccades: 0,
        }
    }

    pub fn advance(
        &mut self,
        tick: &Tick,
        noise: &NoiseSource,
        rng: &mut MotionRng,
        cumulative_sway: &Rotation,
        speech: &SpeechSample,
    ) -> HeadSample {
        let stabilization = slerp(
            &Rotation::identity(),
            &cumulative_sway.inverse(),
            self.config.stabilization,
        );

        if speech.effectively_speaking {
            self.saccade_timer -= tick.dt;
            if self.saccade_timer <= 0.0 {
                self.pick_saccade(rng);
            }
        } else {
            self.saccade_target = Rotation::identity();
            self.saccade_speed = self.config.saccade.idle_return_speed;
        }
        self.saccade_offset = slerp(
            &self.saccade_offset,
            &self.saccade_target,
            tick.dt * self.saccade_speed,
        );

        let drift = self.drift(tick, noise);
        let (jitter, jitter_magnitude) = self.jitter(tick, noise, speech);

        HeadSample {
            stabilization,
            saccade: self.saccade_offset,
            drift,
            jitter,
            offset: stabilization * self.saccade_offset * drift * jitter,
            jitter_magnitude,
        }
    }

    fn pick_saccade(&mut self, rng: &mut MotionRng) {
        let c = &self.config.saccade;
        let kind = rng.pick(&c.outcomes).unwrap_or(HeadSaccadeKind::Center);
        let (target, speed, hold) = match kind {
            HeadSaccadeKind::GlanceAside => {
                let angle = rng.range(c.glance_angle) * rng.sign();
                let target = euler_deg(rng.symmetric(c.glance_jitter), angle, rng.symmetric(c.glance_jitter));
                (target, c.glance_speed, rng.range(c.glance_hold))
            }
            HeadSaccadeKind::Nod => {
                let target = euler_deg(rng.range(c.nod_angle), rng.symmetric(c.nod_jitter), 0.0);
                (target, c.nod_speed, rng.range(c.nod_hold))
            }
            HeadSaccadeKind::Center => (Rotation::identity(), c.center_speed, rng.range(c.center_hold)),
        };
        debug!(
            kind = ?kind,
            angle = rotation::angle_deg(&target),
            hold,
            "head saccade"
        );
        self.saccade_target = target;
        self.saccade_speed = speed;
        self.saccade_timer = hold;
        self.last_saccade = Some(kind);
        self.saccades += 1;
    }

    fn drift(&self, tick: &Tick, noise: &NoiseSource) -> Rotation {
        let c = &self.config;
        let t = tick.time * f64::from(c.drift_speed);
        let yaw = noise.signed(t + 10.0, 0.0);
        let pitch = noise.signed(0.0, t + 10.0);
        let roll = noise.signed(t + 5.0, t + 5.0);
        let magnitude = c.drift_magnitude * (1.0 + tick.arousal);
        let w = &c.drift_weights;
        euler_deg(
            pitch * magnitude * w.pitch,
            yaw * magnitude * w.yaw,
            roll * magnitude * w.roll,
        )
    }

    fn jitter(&self, tick: &Tick, noise: &NoiseSource, speech: &SpeechSample) -> (Rotation, f32) {
        if !speech.effectively_speaking {
            return (Rotation::identity(), 0.0);
        }
        let c = &self.config;
        let st = tick.time * f64::from(c.jitter_frequency);
        let magnitude = c.jitter_gain * speech.intensity
            + tick.arousal * c.jitter_arousal_gain * speech.intensity;
        let w = &c.jitter_weights;
        let jitter = euler_deg(
            noise.signed(st, 0.0) * magnitude * w.pitch,
            noise.signed(0.0, st) * magnitude * w.yaw,
            noise.signed(st, st) * magnitude * w.roll,
        );
        (jitter, magnitude)
    }

    /// Current head-saccade layer
    pub fn saccade_offset(&self) -> Rotation {
        self.saccade_offset
    }

    pub fn saccade_target(&self) -> Rotation {
        self.saccade_target
    }

    pub fn last_saccade(&self) -> Option<HeadSaccadeKind> {
        self.last_saccade
    }

    /// Saccade outcomes drawn so far
    pub fn saccades(&self) -> u32 {
        self.saccades
    }
}

// =============================================================================
// TESTS
// =============================================================================
