//! Gaze state machine
//!
//! State transitions:
//! - any → drawn from `GazeConfig::transitions` whenever the state timer expires
//! - every transition forces an immediate new fixation
//!
//! Fixations within a state:
//! - WANDER: center-biased point, long holds
//! - GLANCE: fixed side target plus jitter
//! - SCAN: reading sweep toward negative yaw, then a new line

use tracing::debug;

use crate::core::random::MotionRng;
use crate::types::rotation::{euler_deg, smoothing_factor};
use crate::types::{GazeConfig, GazePoint, GazeState, Rotation};

/// Eye offsets and gaze bookkeeping for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeSample {
    pub state: GazeState,
    pub current: GazePoint,
    pub target: GazePoint,
    pub left_eye: Rotation,
    pub right_eye: Rotation,
    /// Yaw actually applied per eye after clamping
    pub left_yaw: f32,
    pub right_yaw: f32,
}

/// Three-state gaze machine driving a fixation sub-cycle
#[derive(Debug, Clone)]
pub struct GazeStateMachine {
    config: GazeConfig,
    state: GazeState,
    /// Seconds left in the current state
    state_timer: f32,
    /// Seconds left on the current fixation
    saccade_timer: f32,
    target: GazePoint,
    current: GazePoint,
    transitions: u32,
    fixations: u32,
}

impl GazeStateMachine {
    pub fn new(config: GazeConfig) -> Self {
        Self {
            config,
            state: GazeState::Wander,
            state_timer: 0.0,
            saccade_timer: 0.0,
            target: GazePoint::CENTER,
            current: GazePoint::CENTER,
            transitions: 0,
            fixations: 0,
        }
    }

    pub fn advance(&mut self, dt: f32, rng: &mut MotionRng) -> GazeSample {
        self.state_timer -= dt;
        if self.state_timer <= 0.0 {
            self.transition(rng);
        }

        self.saccade_timer -= dt;
        if self.saccade_timer <= 0.0 {
            self.fixate(rng);
        }

        let k = smoothing_factor(dt, self.config.smoothing_rate);
        self.current = self.current.lerp(self.target, k);
        self.sample()
    }

    /// Eye offsets for the current smoothed gaze, without advancing
    pub fn sample(&self) -> GazeSample {
        let (out, inward) = (self.config.max_outward, self.config.max_inward);
        // Left eye: +yaw is outward; right eye mirrors
        let left_yaw = self.current.yaw.clamp(-inward, out);
        let right_yaw = self.current.yaw.clamp(-out, inward);
        GazeSample {
            state: self.state,
            current: self.current,
            target: self.target,
            left_eye: euler_deg(self.current.pitch, left_yaw, 0.0),
            right_eye: euler_deg(self.current.pitch, right_yaw, 0.0),
            left_yaw,
            right_yaw,
        }
    }

    fn transition(&mut self, rng: &mut MotionRng) {
        let next = rng.pick(&self.config.transitions).unwrap_or(GazeState::Wander);
        let hold = match next {
            GazeState::Wander => self.config.wander.state_hold,
            GazeState::Glance => self.config.glance.state_hold,
            GazeState::Scan => self.config.scan.state_hold,
        };
        self.state_timer = rng.range(hold);
        if next != self.state {
            debug!(from = %self.state, to = %next, hold = self.state_timer, "gaze state");
        }
        self.state = next;
        self.saccade_timer = 0.0;
        self.transitions += 1;
    }

    fn fixate(&mut self, rng: &mut MotionRng) {
        let (target, hold) = match self.state {
            GazeState::Wander => {
                let w = &self.config.wander;
                let u = rng.value();
                let pitch = u * u * rng.sign() * w.amount * w.pitch_scale;
                let yaw = rng.symmetric(w.amount * w.yaw_scale);
                (GazePoint::new(pitch, yaw), rng.range(w.fixation_hold))
            }
            GazeState::Glance => {
                let g = &self.config.glance;
                let n = rng.symmetric(g.jitter);
                (
                    GazePoint::new(g.target.pitch + n, g.target.yaw + n),
                    rng.range(g.fixation_hold),
                )
            }
            GazeState::Scan => {
                let s = &self.config.scan;
                if self.target.yaw < s.line_end_yaw {
                    let yaw = rng.range(s.line_start_yaw);
                    let pitch = rng.range(s.line_pitch);
                    (GazePoint::new(pitch, yaw), rng.range(s.return_hold))
                } else {
                    let yaw = self.target.yaw - rng.range(s.step);
                    let pitch = self.target.pitch + rng.symmetric(s.step_pitch_jitter);
                    (GazePoint::new(pitch, yaw), rng.range(s.step_hold))
                }
            }
        };
        self.target = target;
        self.saccade_timer = hold;
        self.fixations += 1;
    }

    pub fn state(&self) -> GazeState {
        self.state
    }

    pub fn state_timer(&self) -> f32 {
        self.state_timer
    }

    pub fn saccade_timer(&self) -> f32 {
        self.saccade_timer
    }

    pub fn current(&self) -> GazePoint {
        self.current
    }

    pub fn target(&self) -> GazePoint {
        self.target
    }

    /// Pin the fixation point and hold it for `hold` seconds
    pub fn set_target(&mut self, target: GazePoint, hold: f32) {
        self.target = target;
        self.saccade_timer = hold;
    }

    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn fixations(&self) -> u32 {
        self.fixations
    }
}

// =============================================================================
// TESTS
// =============================================================================
