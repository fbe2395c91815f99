//! Director control signals

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_AROUSAL, DEFAULT_EMOTION};

/// Coarse controls set by the director, read by every generator each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSignals {
    /// Current emotion name
    pub emotion: String,
    /// Energy level, always within [0, 1]
    pub arousal: f32,
    pub is_speaking: bool,
    /// When set, `debug_speech_value` replaces the sampled speech intensity
    pub debug_speech_override: bool,
    /// Always within [0, 1]
    pub debug_speech_value: f32,
}

impl Default for ControlSignals {
    fn default() -> Self {
        Self {
            emotion: DEFAULT_EMOTION.to_string(),
            arousal: DEFAULT_AROUSAL,
            is_speaking: false,
            debug_speech_override: false,
            debug_speech_value: 0.0,
        }
    }
}

/// Per-frame inputs shared by every generator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    /// Engine clock in seconds, already advanced by `dt`
    pub time: f64,
    pub dt: f32,
    pub arousal: f32,
    pub is_speaking: bool,
}

/// Clamp to [0, 1], mapping NaN to 0
///
/// Returns the sanitized value and whether the input had to change.
pub fn sanitize_unit(value: f32) -> (f32, bool) {
    if value.is_nan() {
        return (0.0, true);
    }
    let clamped = value.clamp(0.0, 1.0);
    (clamped, clamped != value)
}

/// Frame delta in seconds; negative or non-finite deltas become 0
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Numeric speech level from the director: speaking iff above 0.5
pub fn speaking_from_level(level: f32) -> bool {
    level > 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_in_range_untouched() {
        assert_eq!(sanitize_unit(0.3), (0.3, false));
        assert_eq!(sanitize_unit(0.0), (0.0, false));
        assert_eq!(sanitize_unit(1.0), (1.0, false));
    }

    #[test]
    fn test_sanitize_clamps_and_flags() {
        assert_eq!(sanitize_unit(1.7), (1.0, true));
        assert_eq!(sanitize_unit(-0.2), (0.0, true));
        assert_eq!(sanitize_unit(f32::INFINITY), (1.0, true));
        assert_eq!(sanitize_unit(f32::NEG_INFINITY), (0.0, true));
    }

    #[test]
    fn test_sanitize_nan_is_zero() {
        assert_eq!(sanitize_unit(f32::NAN), (0.0, true));
    }

    #[test]
    fn test_sanitize_idempotent() {
        for v in [-3.0, 0.25, 9.0, f32::NAN] {
            let (once, _) = sanitize_unit(v);
            assert_eq!(sanitize_unit(once), (once, false));
        }
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(-0.016), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_speaking_level_threshold() {
        assert!(!speaking_from_level(0.5));
        assert!(speaking_from_level(0.51));
        assert!(!speaking_from_level(f32::NAN));
    }
}
