//! Blink sequence phases

use serde::{Deserialize, Serialize};

/// Where the blink sequence currently is
///
/// Each variant carries the timers it needs to resume on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum BlinkPhase {
    /// Lid ramping 0 → 100
    Closing { elapsed: f32 },
    /// Fully closed for a jittered moment
    Hold { elapsed: f32, duration: f32 },
    /// Lid ramping 100 → 0
    Opening { elapsed: f32 },
    /// Open, counting down to the next blink
    Waiting { remaining: f32 },
}

impl BlinkPhase {
    pub fn name(&self) -> &'static str {
        match self {
            BlinkPhase::Closing { .. } => "closing",
            BlinkPhase::Hold { .. } => "hold",
            BlinkPhase::Opening { .. } => "opening",
            BlinkPhase::Waiting { .. } => "waiting",
        }
    }
}

/// Exact timing of the last completed close/hold/open cycle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlinkCycle {
    pub close_secs: f32,
    pub hold_secs: f32,
    pub open_secs: f32,
    /// True when the following wait was the short flutter pause
    pub flutter: bool,
}
