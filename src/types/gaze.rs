//! Gaze and head-saccade state definitions

use serde::{Deserialize, Serialize};

/// High-level eye behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GazeState {
    /// Idle fixations biased toward center
    Wander,
    /// Looking at a fixed side target (a monitor, a script)
    Glance,
    /// Reading-style left-to-right sweeps
    Scan,
}

impl GazeState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GazeState::Wander => "\x1b[90m",
            GazeState::Glance => "\x1b[33m",
            GazeState::Scan => "\x1b[36m",
        }
    }
}

impl std::fmt::Display for GazeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GazeState::Wander => "WANDER",
            GazeState::Glance => "GLANCE",
            GazeState::Scan => "SCAN",
        };
        write!(f, "{}", name)
    }
}

/// Eye fixation in degrees: pitch about X, yaw about Y
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GazePoint {
    pub pitch: f32,
    pub yaw: f32,
}

impl GazePoint {
    pub const CENTER: Self = Self { pitch: 0.0, yaw: 0.0 };

    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    pub fn distance(self, other: Self) -> f32 {
        let dp = self.pitch - other.pitch;
        let dy = self.yaw - other.yaw;
        (dp * dp + dy * dy).sqrt()
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            pitch: self.pitch + (other.pitch - self.pitch) * t,
            yaw: self.yaw + (other.yaw - self.yaw) * t,
        }
    }
}

/// Outcome of a speech-driven head saccade draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadSaccadeKind {
    /// Quick yaw to one side
    GlanceAside,
    /// Small downward pitch
    Nod,
    /// Drift back to neutral
    Center,
}
