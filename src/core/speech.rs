//! Speech intensity: vowel weights (or a debug value) reduced to one signal

use crate::types::{ControlSignals, SpeechConfig, VOWEL_KEYS};

/// Speech level seen by the head and arm generators this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeechSample {
    /// Within [0, 1]
    pub intensity: f32,
    /// Above threshold, or the debug override is active
    pub effectively_speaking: bool,
}

#[derive(Debug, Clone)]
pub struct SpeechIntensitySampler {
    config: SpeechConfig,
}

impl SpeechIntensitySampler {
    pub fn new(config: SpeechConfig) -> Self {
        Self { config }
    }

    pub fn sample(&self, vowels: &[f32; VOWEL_KEYS.len()], signals: &ControlSignals) -> SpeechSample {
        let intensity = if signals.debug_speech_override {
            signals.debug_speech_value.clamp(0.0, 1.0)
        } else {
            vowels
                .iter()
                .filter(|w| w.is_finite())
                .sum::<f32>()
                .clamp(0.0, 1.0)
        };
        SpeechSample {
            intensity,
            effectively_speaking: intensity > self.config.threshold || signals.debug_speech_override,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sampler() -> SpeechIntensitySampler {
        SpeechIntensitySampler::new(SpeechConfig::default())
    }

    #[test]
    fn test_silence() {
        let s = sampler().sample(&[0.0; 5], &ControlSignals::default());
        assert_eq!(s, SpeechSample { intensity: 0.0, effectively_speaking: false });
    }

    #[test]
    fn test_vowels_sum_and_clamp() {
        let signals = ControlSignals::default();
        let s = sampler().sample(&[0.1, 0.2, 0.0, 0.0, 0.1], &signals);
        assert!((s.intensity - 0.4).abs() < 1e-6);
        assert!(s.effectively_speaking);

        let loud = sampler().sample(&[0.9, 0.9, 0.9, 0.0, 0.0], &signals);
        assert_eq!(loud.intensity, 1.0);
    }

    #[test]
    fn test_below_threshold_is_silent() {
        let s = sampler().sample(&[0.04, 0.0, 0.0, 0.0, 0.0], &ControlSignals::default());
        assert!(!s.effectively_speaking);
    }

    #[test]
    fn test_non_finite_vowel_ignored() {
        let s = sampler().sample(&[f32::NAN, 0.3, 0.0, 0.0, 0.0], &ControlSignals::default());
        assert!((s.intensity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_debug_override_replaces_vowels() {
        let signals = ControlSignals {
            debug_speech_override: true,
            debug_speech_value: 0.0,
            ..ControlSignals::default()
        };
        let s = sampler().sample(&[1.0; 5], &signals);
        assert_eq!(s.intensity, 0.0);
        assert!(s.effectively_speaking);
    }
}
