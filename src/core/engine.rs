//! Motion engine facade
//!
//! Owns the rig adapter, the seeded randomness and every generator.
//! The director drives it through the setters; the host calls
//! `advance(dt)` once per frame after its own pose-animation pass.
//!
//! Per-frame order (sway must precede the head, which counter-rotates it):
//! breathing → sway → head → arms → gaze → blink

use tracing::{debug, warn};

use crate::core::arms::ArmGestureModulator;
use crate::core::blink::BlinkScheduler;
use crate::core::breathing::BreathingOscillator;
use crate::core::gaze::GazeStateMachine;
use crate::core::head::HeadMotionComposer;
use crate::core::random::{MotionRng, NoiseSource};
use crate::core::rig::{ExpressionId, Rig, RigAdapter};
use crate::core::speech::SpeechIntensitySampler;
use crate::core::sway::{SwayOscillator, SwaySample};
use crate::types::rotation::angle_deg;
use crate::types::{
    sanitize_dt, sanitize_unit, speaking_from_level, Bone, ConfigError, ControlSignals,
    EngineStats, FrameOutput, MotionConfig, ReasonCode, Rotation, Tick,
};

/// Mixed into the noise seed to derive an independent RNG seed
const RNG_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generators that can be switched off at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Breathing,
    Sway,
    Head,
    Arms,
    Gaze,
    Blink,
}

#[derive(Debug, Clone)]
struct ResolvedEmotion {
    name: String,
    expression: Option<ExpressionId>,
}

/// The autonomous motion engine
#[derive(Debug)]
pub struct MotionEngine<R: Rig> {
    adapter: RigAdapter<R>,
    config: MotionConfig,
    signals: ControlSignals,
    noise: NoiseSource,
    rng: MotionRng,
    rng_seed: u64,
    breathing: BreathingOscillator,
    sway: SwayOscillator,
    head: HeadMotionComposer,
    arms: ArmGestureModulator,
    gaze: GazeStateMachine,
    blink: BlinkScheduler,
    speech: SpeechIntensitySampler,
    emotions: Vec<ResolvedEmotion>,
    /// Seconds since construction; `f64` so 1/60 s steps still register after weeks
    time: f64,
    frame: u64,
}

impl<R: Rig> MotionEngine<R> {
    /// Build an engine whose noise and RNG seeds both derive from `seed`
    pub fn new(rig: R, config: MotionConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_seeds(rig, config, seed, seed ^ RNG_SEED_SALT)
    }

    /// Build an engine with explicit noise and RNG seeds
    pub fn with_seeds(
        rig: R,
        config: MotionConfig,
        noise_seed: u64,
        rng_seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let adapter = RigAdapter::new(rig);

        let emotions = config
            .emotions
            .iter()
            .map(|binding| {
                let expression = adapter.resolve_expression(&binding.expression);
                if expression.is_none() {
                    warn!(
                        emotion = %binding.name,
                        expression = %binding.expression,
                        "expression not found; emotion has no visible effect"
                    );
                }
                ResolvedEmotion {
                    name: binding.name.clone(),
                    expression,
                }
            })
            .collect();

        Ok(Self {
            adapter,
            signals: ControlSignals::default(),
            noise: NoiseSource::new(noise_seed),
            rng: MotionRng::new(rng_seed),
            rng_seed,
            breathing: BreathingOscillator::new(config.breathing.clone()),
            sway: SwayOscillator::new(config.sway.clone()),
            head: HeadMotionComposer::new(config.head.clone()),
            arms: ArmGestureModulator::new(config.arms.clone()),
            gaze: GazeStateMachine::new(config.gaze.clone()),
            blink: BlinkScheduler::new(config.blink.clone()),
            speech: SpeechIntensitySampler::new(config.speech.clone()),
            emotions,
            config,
            time: 0.0,
            frame: 0,
        })
    }

    // =========================================================================
    // Director API
    // =========================================================================

    /// Switch emotion; unknown names and the active emotion are no-ops
    pub fn set_emotion(&mut self, name: &str) -> ReasonCode {
        let Some(target) = self.emotions.iter().position(|e| e.name == name) else {
            warn!(
                emotion = name,
                code = ReasonCode::M002_UNKNOWN_EMOTION.code(),
                "unknown emotion; keeping current"
            );
            return ReasonCode::M002_UNKNOWN_EMOTION;
        };
        if self.signals.emotion == name {
            return ReasonCode::M002_EMOTION_UNCHANGED;
        }

        let active = self.emotions[target].expression;
        for emotion in &self.emotions {
            if let Some(id) = emotion.expression {
                let weight = if Some(id) == active { 1.0 } else { 0.0 };
                self.adapter.set_expression_weight(id, weight);
            }
        }
        debug!(from = %self.signals.emotion, to = name, "emotion");
        self.signals.emotion = name.to_string();
        ReasonCode::M002_EMOTION_APPLIED
    }

    /// Switch emotion by numeric director ID
    pub fn set_emotion_id(&mut self, id: i32) -> ReasonCode {
        let name = usize::try_from(id)
            .ok()
            .and_then(|i| self.config.emotion_ids.get(i))
            .cloned();
        match name {
            Some(name) => self.set_emotion(&name),
            None => {
                warn!(
                    id,
                    code = ReasonCode::M002_UNKNOWN_EMOTION.code(),
                    "unknown emotion id; keeping current"
                );
                ReasonCode::M002_UNKNOWN_EMOTION
            }
        }
    }

    /// Store arousal, clamped to [0, 1] (NaN becomes 0)
    pub fn set_arousal(&mut self, value: f32) -> ReasonCode {
        let (arousal, changed) = sanitize_unit(value);
        self.signals.arousal = arousal;
        if changed {
            warn!(
                requested = value,
                applied = arousal,
                code = ReasonCode::M003_SIGNAL_SANITIZED.code(),
                "arousal out of range"
            );
            ReasonCode::M003_SIGNAL_SANITIZED
        } else {
            ReasonCode::M003_SIGNAL_ACCEPTED
        }
    }

    pub fn set_speaking_state(&mut self, is_speaking: bool) {
        self.signals.is_speaking = is_speaking;
    }

    /// Numeric speech flag from the director: speaking iff above 0.5
    pub fn set_speaking_level(&mut self, level: f32) {
        self.set_speaking_state(speaking_from_level(level));
    }

    /// Replace the sampled speech intensity with `value` while `active`
    pub fn set_debug_speech(&mut self, active: bool, value: f32) -> ReasonCode {
        let (value, changed) = sanitize_unit(value);
        self.signals.debug_speech_override = active;
        self.signals.debug_speech_value = value;
        if changed {
            warn!(
                applied = value,
                code = ReasonCode::M003_SIGNAL_SANITIZED.code(),
                "debug speech value out of range"
            );
            return ReasonCode::M003_SIGNAL_SANITIZED;
        }
        if active {
            ReasonCode::M004_DEBUG_SPEECH_ON
        } else {
            ReasonCode::M004_DEBUG_SPEECH_OFF
        }
    }

    /// Enable or disable one generator; a disabled generator stops writing
    pub fn set_enabled(&mut self, feature: Feature, enabled: bool) {
        let flag = match feature {
            Feature::Breathing => &mut self.config.breathing.enabled,
            Feature::Sway => &mut self.config.sway.enabled,
            Feature::Head => &mut self.config.head.enabled,
            Feature::Arms => &mut self.config.arms.enabled,
            Feature::Gaze => &mut self.config.gaze.enabled,
            Feature::Blink => &mut self.config.blink.enabled,
        };
        *flag = enabled;
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Breathing => self.config.breathing.enabled,
            Feature::Sway => self.config.sway.enabled,
            Feature::Head => self.config.head.enabled,
            Feature::Arms => self.config.arms.enabled,
            Feature::Gaze => self.config.gaze.enabled,
            Feature::Blink => self.config.blink.enabled,
        }
    }

    /// Re-capture the rig's current pose as rest
    pub fn recapture_rest(&mut self) {
        self.adapter.recapture_rest();
    }

    // =========================================================================
    // Frame pass
    // =========================================================================

    /// Run every generator once and write the results onto the rig
    pub fn advance(&mut self, dt: f32) -> FrameOutput {
        let dt = sanitize_dt(dt);
        self.time += f64::from(dt);
        self.frame += 1;

        let tick = Tick {
            time: self.time,
            dt,
            arousal: self.signals.arousal,
            is_speaking: self.signals.is_speaking,
        };
        let speech = self.speech.sample(&self.adapter.vowel_weights(), &self.signals);

        let mut out = FrameOutput {
            frame: self.frame,
            time: self.time,
            dt,
            arousal: tick.arousal,
            is_speaking: tick.is_speaking,
            speech_intensity: speech.intensity,
            effectively_speaking: speech.effectively_speaking,
            gaze_state: self.gaze.state(),
            gaze: self.gaze.current(),
            gaze_target: self.gaze.target(),
            ..FrameOutput::default()
        };

        let breath = if self.config.breathing.enabled {
            let offset = self.breathing.advance(&tick, &self.noise);
            out.breath_rate = self.breathing.rate();
            Some(offset)
        } else {
            None
        };

        let sway = if self.config.sway.enabled {
            let sample = self.sway.advance(&tick, &self.noise);
            out.sway_magnitude = sample.magnitude;
            self.write(&mut out, Bone::Spine, &sample.spine);
            sample
        } else {
            SwaySample::still()
        };

        // Chest carries breathing and sway together
        if breath.is_some() || self.config.sway.enabled {
            let chest = breath.unwrap_or_else(Rotation::identity) * sway.chest;
            self.write(&mut out, Bone::Chest, &chest);
        }

        if self.config.head.enabled {
            let head = self.head.advance(
                &tick,
                &self.noise,
                &mut self.rng,
                &sway.cumulative,
                &speech,
            );
            out.jitter_magnitude = head.jitter_magnitude;
            out.head_saccade_deg = angle_deg(&head.saccade);
            self.write(&mut out, Bone::Head, &head.offset);
        }

        if self.config.arms.enabled {
            let arms = self.arms.advance(&tick, &self.noise);
            self.write(&mut out, Bone::LeftUpperArm, &arms.left);
            self.write(&mut out, Bone::RightUpperArm, &arms.right);
        }

        if self.config.gaze.enabled {
            let gaze = self.gaze.advance(dt, &mut self.rng);
            out.gaze_state = gaze.state;
            out.gaze = gaze.current;
            out.gaze_target = gaze.target;
            self.write(&mut out, Bone::LeftEye, &gaze.left_eye);
            self.write(&mut out, Bone::RightEye, &gaze.right_eye);
        }

        if self.config.blink.enabled {
            let weight = self.blink.tick(dt, tick.arousal, &mut self.rng);
            self.adapter.set_blink_weight(weight);
            out.blink_weight = weight;
        }

        out
    }

    fn write(&mut self, out: &mut FrameOutput, bone: Bone, offset: &Rotation) {
        if let Some(written) = self.adapter.apply_offset(bone, offset) {
            out.set_rotation(bone, &written);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn signals(&self) -> &ControlSignals {
        &self.signals
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Engine clock in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn noise_seed(&self) -> u64 {
        self.noise.seed()
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            frames: self.frame,
            gaze_transitions: self.gaze.transitions(),
            gaze_fixations: self.gaze.fixations(),
            head_saccades: self.head.saccades(),
            blinks: self.blink.blinks(),
        }
    }

    pub fn head(&self) -> &HeadMotionComposer {
        &self.head
    }

    pub fn gaze(&self) -> &GazeStateMachine {
        &self.gaze
    }

    pub fn blink(&self) -> &BlinkScheduler {
        &self.blink
    }

    pub fn breathing(&self) -> &BreathingOscillator {
        &self.breathing
    }

    pub fn adapter(&self) -> &RigAdapter<R> {
        &self.adapter
    }

    pub fn rig(&self) -> &R {
        self.adapter.rig()
    }

    /// Host access, e.g. to drive vowel expressions from lip sync
    pub fn rig_mut(&mut self) -> &mut R {
        self.adapter.rig_mut()
    }

    pub fn into_rig(self) -> R {
        self.adapter.into_inner()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryRig;
    use pretty_assertions::assert_eq;

    const DT: f32 = 1.0 / 60.0;

    fn engine() -> MotionEngine<MemoryRig> {
        MotionEngine::new(MemoryRig::humanoid(), MotionConfig::default(), 42).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MotionConfig::default();
        config.blink.open_duration = -1.0;
        assert!(MotionEngine::new(MemoryRig::humanoid(), config, 1).is_err());
    }

    #[test]
    fn test_arousal_clamped() {
        let mut e = engine();
        assert_eq!(e.set_arousal(1.7), ReasonCode::M003_SIGNAL_SANITIZED);
        assert_eq!(e.signals().arousal, 1.0);
        assert_eq!(e.set_arousal(f32::NAN), ReasonCode::M003_SIGNAL_SANITIZED);
        assert_eq!(e.signals().arousal, 0.0);
        assert_eq!(e.set_arousal(0.25), ReasonCode::M003_SIGNAL_ACCEPTED);
        assert_eq!(e.signals().arousal, 0.25);
    }

    #[test]
    fn test_emotion_applies_exclusively() {
        let mut e = engine();
        assert_eq!(e.set_emotion("joy"), ReasonCode::M002_EMOTION_APPLIED);
        assert_eq!(e.signals().emotion, "joy");
        assert_eq!(e.rig().expression("happy"), Some(1.0));
        for key in ["neutral", "angry", "sad", "relaxed", "surprised"] {
            assert_eq!(e.rig().expression(key), Some(0.0), "{key}");
        }
    }

    #[test]
    fn test_same_emotion_makes_no_calls() {
        let mut e = engine();
        e.set_emotion("angry");
        let writes = e.rig().expression_writes();
        assert_eq!(e.set_emotion("angry"), ReasonCode::M002_EMOTION_UNCHANGED);
        assert_eq!(e.rig().expression_writes(), writes);
    }

    #[test]
    fn test_unknown_emotion_keeps_state() {
        let mut e = engine();
        e.set_emotion("fun");
        assert_eq!(e.set_emotion("bored"), ReasonCode::M002_UNKNOWN_EMOTION);
        assert_eq!(e.signals().emotion, "fun");
        assert_eq!(e.rig().expression("relaxed"), Some(1.0));
    }

    #[test]
    fn test_emotion_ids() {
        let mut e = engine();
        assert_eq!(e.set_emotion_id(3), ReasonCode::M002_EMOTION_APPLIED);
        assert_eq!(e.signals().emotion, "sorrow");
        assert_eq!(e.set_emotion_id(5), ReasonCode::M002_UNKNOWN_EMOTION);
        assert_eq!(e.set_emotion_id(-1), ReasonCode::M002_UNKNOWN_EMOTION);
        assert_eq!(e.signals().emotion, "sorrow");
    }

    #[test]
    fn test_speaking_level() {
        let mut e = engine();
        e.set_speaking_level(0.9);
        assert!(e.signals().is_speaking);
        e.set_speaking_level(0.5);
        assert!(!e.signals().is_speaking);
    }

    #[test]
    fn test_debug_speech_codes() {
        let mut e = engine();
        assert_eq!(e.set_debug_speech(true, 0.7), ReasonCode::M004_DEBUG_SPEECH_ON);
        assert_eq!(e.set_debug_speech(true, 3.0), ReasonCode::M003_SIGNAL_SANITIZED);
        assert_eq!(e.signals().debug_speech_value, 1.0);
        assert_eq!(e.set_debug_speech(false, 0.0), ReasonCode::M004_DEBUG_SPEECH_OFF);
    }

    #[test]
    fn test_advance_writes_every_bone() {
        let mut e = engine();
        let out = e.advance(DT);
        assert_eq!(out.frame, 1);
        for bone in Bone::ALL {
            let expected = !matches!(bone, Bone::Hips);
            assert_eq!(out.rotation(bone).is_some(), expected, "{bone}");
        }
        let head = out.rotation(Bone::Head).unwrap();
        assert!(e.rig().bone_rotation("Head").unwrap().angle_to(&head) < 1e-6);
    }

    #[test]
    fn test_bad_dt_does_not_move_clock() {
        let mut e = engine();
        e.advance(DT);
        let t = e.time();
        let out = e.advance(f32::NAN);
        assert_eq!(out.dt, 0.0);
        assert_eq!(e.time(), t);
        e.advance(-1.0);
        assert_eq!(e.time(), t);
    }

    #[test]
    fn test_disabled_feature_stops_writing() {
        let mut e = engine();
        e.set_enabled(Feature::Gaze, false);
        e.set_enabled(Feature::Blink, false);
        let out = e.advance(DT);
        assert!(out.rotation(Bone::LeftEye).is_none());
        assert_eq!(out.blink_weight, 0.0);
        assert_eq!(e.rig().blend_shape_weight("Fcl_EYE_Close_L"), Some(0.0));
        assert!(!e.is_enabled(Feature::Gaze));
    }

    #[test]
    fn test_chest_without_breathing_is_sway_only() {
        let mut e = engine();
        e.set_enabled(Feature::Sway, false);
        e.set_enabled(Feature::Breathing, false);
        let out = e.advance(DT);
        assert!(out.rotation(Bone::Chest).is_none());
        assert!(out.rotation(Bone::Spine).is_none());
    }

    #[test]
    fn test_vowels_drive_speech() {
        let mut e = engine();
        e.rig_mut().set_expression("aa", 0.6);
        let out = e.advance(DT);
        assert!((out.speech_intensity - 0.6).abs() < 1e-6);
        assert!(out.effectively_speaking);
    }

    #[test]
    fn test_derived_seeds_are_distinct() {
        let e = engine();
        assert_eq!(e.noise_seed(), 42);
        assert_ne!(e.rng_seed(), 42);
    }
}
