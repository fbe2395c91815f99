//! Per-frame output and run summaries

use chrono::{DateTime, Utc};
use colored::Colorize;
use nalgebra::{Quaternion, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::types::rotation::{self, Rotation};
use crate::types::{Bone, GazePoint, GazeState};

/// Everything the engine decided in one `advance` call
///
/// `Copy` so the frame pass never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Frame counter, starting at 1 for the first advance
    pub frame: u64,
    /// Engine clock after this frame (seconds)
    pub time: f64,
    pub dt: f32,
    pub arousal: f32,
    pub is_speaking: bool,
    pub speech_intensity: f32,
    pub effectively_speaking: bool,
    /// Breathing phase rate (radians per second)
    pub breath_rate: f32,
    pub sway_magnitude: f32,
    pub jitter_magnitude: f32,
    /// Angle of the head-saccade layer in degrees
    pub head_saccade_deg: f32,
    pub gaze_state: GazeState,
    pub gaze: GazePoint,
    pub gaze_target: GazePoint,
    /// 0 (open) to 100 (closed)
    pub blink_weight: f32,
    /// Final local rotation written per bone, `[x, y, z, w]`
    pub bones: [Option<[f32; 4]>; Bone::COUNT],
}

impl Default for FrameOutput {
    fn default() -> Self {
        Self {
            frame: 0,
            time: 0.0,
            dt: 0.0,
            arousal: 0.0,
            is_speaking: false,
            speech_intensity: 0.0,
            effectively_speaking: false,
            breath_rate: 0.0,
            sway_magnitude: 0.0,
            jitter_magnitude: 0.0,
            head_saccade_deg: 0.0,
            gaze_state: GazeState::Wander,
            gaze: GazePoint::CENTER,
            gaze_target: GazePoint::CENTER,
            blink_weight: 0.0,
            bones: [None; Bone::COUNT],
        }
    }
}

impl FrameOutput {
    /// Rotation written to `bone` this frame, if any
    pub fn rotation(&self, bone: Bone) -> Option<Rotation> {
        self.bones[bone.index()].map(|[x, y, z, w]| {
            UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z))
        })
    }

    pub(crate) fn set_rotation(&mut self, bone: Bone, value: &Rotation) {
        self.bones[bone.index()] = Some(rotation::to_array(value));
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let speech = if self.effectively_speaking {
            format!("speech={:.2}", self.speech_intensity).green()
        } else {
            format!("speech={:.2}", self.speech_intensity).dimmed()
        };
        let blink = if self.blink_weight > 0.0 {
            format!("blink={:5.1}", self.blink_weight).yellow()
        } else {
            format!("blink={:5.1}", self.blink_weight).normal()
        };
        format!(
            "{} t={:7.3}s | arousal={:.2} | {} | breath={:.2} | sway={:.2} | {}{:<6}\x1b[0m gaze=({:+6.2},{:+6.2}) | {}",
            format!("#{:05}", self.frame).bold(),
            self.time,
            self.arousal,
            speech,
            self.breath_rate,
            self.sway_magnitude,
            self.gaze_state.color_code(),
            self.gaze_state,
            self.gaze.pitch,
            self.gaze.yaw,
            blink,
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "frame={} t={:.3} arousal={:.2} speech={:.3} speaking={} breath={:.3} sway={:.3} jitter={:.3} saccade={:.2} gaze={} pitch={:.2} yaw={:.2} blink={:.1}",
            self.frame,
            self.time,
            self.arousal,
            self.speech_intensity,
            self.effectively_speaking,
            self.breath_rate,
            self.sway_magnitude,
            self.jitter_magnitude,
            self.head_saccade_deg,
            self.gaze_state,
            self.gaze.pitch,
            self.gaze.yaw,
            self.blink_weight,
        )
    }
}

/// Event counters accumulated across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineStats {
    pub frames: u64,
    pub gaze_transitions: u32,
    pub gaze_fixations: u32,
    pub head_saccades: u32,
    pub blinks: u32,
}

/// Summary of a simulated run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub simulated_secs: f64,
    pub emotion: String,
    pub stats: EngineStats,
    /// SHA-256 of the frame trajectory, hex encoded
    pub fingerprint: String,
}

impl RunSummary {
    pub fn new(seed: u64, simulated_secs: f64, emotion: String, stats: EngineStats, fingerprint: String) -> Self {
        Self {
            started_at: Utc::now(),
            seed,
            simulated_secs,
            emotion,
            stats,
            fingerprint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rotation::euler_deg;

    #[test]
    fn test_rotation_roundtrip_through_frame() {
        let mut frame = FrameOutput::default();
        let q = euler_deg(3.0, -7.0, 1.5);
        frame.set_rotation(Bone::Head, &q);
        let back = frame.rotation(Bone::Head).unwrap();
        assert!(back.angle_to(&q) < 1e-5);
        assert!(frame.rotation(Bone::Chest).is_none());
    }

    #[test]
    fn test_parseable_string_has_no_escape_codes() {
        let frame = FrameOutput::default();
        assert!(!frame.to_parseable_string().contains('\x1b'));
        assert!(frame.to_parseable_string().contains("gaze=WANDER"));
    }

    #[test]
    fn test_frame_serializes_missing_bones_as_null() {
        let json = serde_json::to_value(FrameOutput::default()).unwrap();
        assert!(json["bones"][0].is_null());
        assert_eq!(json["gaze_state"], "WANDER");
    }
}
