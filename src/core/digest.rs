//! Trajectory fingerprints for determinism checks
//!
//! Every frame is folded into a SHA-256 over the little-endian bytes of
//! its fields, so two runs match iff their outputs are bit-identical.

use sha2::{Digest, Sha256};

use crate::types::FrameOutput;

#[derive(Debug, Clone, Default)]
pub struct TrajectoryDigest {
    hasher: Sha256,
    frames: u64,
}

impl TrajectoryDigest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame into the digest
    pub fn update(&mut self, frame: &FrameOutput) {
        let h = &mut self.hasher;
        h.update(frame.frame.to_le_bytes());
        h.update(frame.time.to_le_bytes());
        for value in [
            frame.dt,
            frame.arousal,
            frame.speech_intensity,
            frame.breath_rate,
            frame.sway_magnitude,
            frame.jitter_magnitude,
            frame.head_saccade_deg,
            frame.gaze.pitch,
            frame.gaze.yaw,
            frame.gaze_target.pitch,
            frame.gaze_target.yaw,
            frame.blink_weight,
        ] {
            h.update(value.to_le_bytes());
        }
        h.update([
            frame.is_speaking as u8,
            frame.effectively_speaking as u8,
            frame.gaze_state as u8,
        ]);
        for bone in &frame.bones {
            match bone {
                Some(components) => {
                    h.update([1u8]);
                    for c in components {
                        h.update(c.to_le_bytes());
                    }
                }
                None => h.update([0u8]),
            }
        }
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Raw SHA-256 of everything folded so far
    pub fn finish(self) -> [u8; 32] {
        let result = self.hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Lowercase hex of `finish`
    pub fn finish_hex(self) -> String {
        self.finish().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
