//! Blink scheduler
//!
//! Phase sequence, re-entered every cycle:
//! - CLOSING: linear 0 → 100 over `close_duration`
//! - HOLD: fully closed for a draw from `hold`
//! - OPENING: linear 100 → 0 over `open_duration`
//! - WAITING: `flutter_pause` with probability `flutter_chance`, else
//!   `[0.5, 1.5] × base_interval / (1 + arousal)`
//!
//! `tick(dt)` carries leftover time across phase boundaries, so cycle
//! timing does not depend on the frame rate.

use crate::core::random::MotionRng;
use crate::types::{BlinkConfig, BlinkCycle, BlinkPhase, Range};
use crate::BLINK_WEIGHT_MAX;

/// Phase changes processed per tick at most; leftover time is dropped
const MAX_PHASE_STEPS: usize = 8;

#[derive(Debug, Clone)]
pub struct BlinkScheduler {
    config: BlinkConfig,
    phase: BlinkPhase,
    weight: f32,
    /// Timings of the cycle in progress
    cycle: BlinkCycle,
    last_cycle: Option<BlinkCycle>,
    blinks: u32,
}

impl BlinkScheduler {
    /// Starts closing on the first tick
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            config,
            phase: BlinkPhase::Closing { elapsed: 0.0 },
            weight: 0.0,
            cycle: BlinkCycle::default(),
            last_cycle: None,
            blinks: 0,
        }
    }

    /// Advance by `dt` seconds and return the blink weight (0-100)
    pub fn tick(&mut self, dt: f32, arousal: f32, rng: &mut MotionRng) -> f32 {
        let mut remaining = dt.max(0.0);
        for _ in 0..MAX_PHASE_STEPS {
            match self.phase {
                BlinkPhase::Closing { elapsed } => {
                    let close = self.config.close_duration;
                    let elapsed = elapsed + remaining;
                    if elapsed < close {
                        self.phase = BlinkPhase::Closing { elapsed };
                        self.weight = elapsed / close * BLINK_WEIGHT_MAX;
                        break;
                    }
                    remaining = elapsed - close;
                    self.cycle.close_secs = close;
                    self.weight = BLINK_WEIGHT_MAX;
                    self.phase = BlinkPhase::Hold {
                        elapsed: 0.0,
                        duration: rng.range(self.config.hold),
                    };
                }
                BlinkPhase::Hold { elapsed, duration } => {
                    let elapsed = elapsed + remaining;
                    if elapsed < duration {
                        self.phase = BlinkPhase::Hold { elapsed, duration };
                        self.weight = BLINK_WEIGHT_MAX;
                        break;
                    }
                    remaining = elapsed - duration;
                    self.cycle.hold_secs = duration;
                    self.phase = BlinkPhase::Opening { elapsed: 0.0 };
                }
                BlinkPhase::Opening { elapsed } => {
                    let open = self.config.open_duration;
                    let elapsed = elapsed + remaining;
                    if elapsed < open {
                        self.phase = BlinkPhase::Opening { elapsed };
                        self.weight = BLINK_WEIGHT_MAX - elapsed / open * BLINK_WEIGHT_MAX;
                        break;
                    }
                    remaining = elapsed - open;
                    self.weight = 0.0;
                    self.cycle.open_secs = open;
                    self.cycle.flutter = rng.chance(self.config.flutter_chance);
                    let wait = if self.cycle.flutter {
                        self.config.flutter_pause
                    } else {
                        let base = self.config.base_interval;
                        rng.range(Range::new(base * 0.5, base * 1.5)) / (1.0 + arousal)
                    };
                    self.last_cycle = Some(self.cycle);
                    self.cycle = BlinkCycle::default();
                    self.blinks += 1;
                    self.phase = BlinkPhase::Waiting { remaining: wait };
                }
                BlinkPhase::Waiting { remaining: wait } => {
                    if remaining < wait {
                        self.phase = BlinkPhase::Waiting {
                            remaining: wait - remaining,
                        };
                        self.weight = 0.0;
                        break;
                    }
                    remaining -= wait;
                    self.phase = BlinkPhase::Closing { elapsed: 0.0 };
                }
            }
        }
        self.weight
    }

    /// Current weight, 0 (open) to 100 (closed)
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Last completed close/hold/open cycle
    pub fn last_cycle(&self) -> Option<BlinkCycle> {
        self.last_cycle
    }

    /// Completed blinks
    pub fn blinks(&self) -> u32 {
        self.blinks
    }
}

// =============================================================================
// TESTS
// =============================================================================
