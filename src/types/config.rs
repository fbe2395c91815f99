//! Tunable parameters for every generator
//!
//! All sections deserialize with defaults, so a config file only needs
//! the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{ConfigError, GazePoint, GazeState, HeadSaccadeKind};
use crate::{
    ARM_BASE_ANGLE, ARM_SMOOTHING_RATE, BLINK_BASE_INTERVAL, BLINK_CLOSE_DURATION,
    BLINK_FLUTTER_CHANCE, BLINK_OPEN_DURATION, BREATH_BASE_INTENSITY, BREATH_BASE_SPEED,
    BREATH_NOISE_RATE, EYE_MAX_INWARD, EYE_MAX_OUTWARD, GAZE_SMOOTHING_RATE,
    HEAD_STABILIZATION, JITTER_FREQUENCY, SPEAKING_BOOST, SPEECH_THRESHOLD, SWAY_BASE_MAGNITUDE,
    SWAY_SPEED,
};

/// Inclusive uniform range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::invalid(field, "range bounds must be finite"));
        }
        if self.min > self.max {
            return Err(ConfigError::invalid(field, format!("min {} > max {}", self.min, self.max)));
        }
        Ok(())
    }
}

/// One branch of a weighted draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weighted<T> {
    pub weight: f32,
    pub value: T,
}

/// Cumulative-probability table for weighted branching
///
/// Weights need not sum to 1; a uniform draw in [0, 1) is scaled by the
/// total before walking the cumulative sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTable<T> {
    pub entries: Vec<Weighted<T>>,
}

impl<T: Copy> ProbabilityTable<T> {
    pub fn new(entries: &[(f32, T)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(weight, value)| Weighted { weight, value })
                .collect(),
        }
    }

    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Select the entry for uniform draw `r` in [0, 1)
    pub fn pick(&self, r: f32) -> Option<T> {
        let threshold = r.clamp(0.0, 1.0) * self.total_weight();
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if threshold < cumulative {
                return Some(entry.value);
            }
        }
        self.entries.last().map(|e| e.value)
    }

    fn check(&self, field: &str) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::invalid(field, "table has no entries"));
        }
        if self.entries.iter().any(|e| !e.weight.is_finite() || e.weight < 0.0) {
            return Err(ConfigError::invalid(field, "weights must be finite and non-negative"));
        }
        if self.total_weight() <= 0.0 {
            return Err(ConfigError::invalid(field, "total weight must be positive"));
        }
        Ok(())
    }
}

/// Per-axis multipliers for an Euler offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisWeights {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl AxisWeights {
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    fn check(&self, field: &str) -> Result<(), ConfigError> {
        if [self.pitch, self.yaw, self.roll].iter().all(|w| w.is_finite()) {
            Ok(())
        } else {
            Err(ConfigError::invalid(field, "axis weights must be finite"))
        }
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    pub enabled: bool,
    pub base_speed: f32,
    /// Peak chest pitch in degrees
    pub base_intensity: f32,
    pub noise_rate: f32,
    pub speaking_boost: f32,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_speed: BREATH_BASE_SPEED,
            base_intensity: BREATH_BASE_INTENSITY,
            noise_rate: BREATH_NOISE_RATE,
            speaking_boost: SPEAKING_BOOST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    pub enabled: bool,
    pub base_magnitude: f32,
    pub speed: f32,
    pub speaking_boost: f32,
    /// Roll dominates so the body leans sideways rather than lurching
    pub spine_weights: AxisWeights,
    pub chest_weights: AxisWeights,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_magnitude: SWAY_BASE_MAGNITUDE,
            speed: SWAY_SPEED,
            speaking_boost: SPEAKING_BOOST,
            spine_weights: AxisWeights::new(0.1, 0.3, 1.5),
            chest_weights: AxisWeights::new(0.1, 0.3, 0.8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadSaccadeConfig {
    pub outcomes: ProbabilityTable<HeadSaccadeKind>,
    pub glance_angle: Range,
    pub glance_jitter: f32,
    pub glance_speed: f32,
    pub glance_hold: Range,
    pub nod_angle: Range,
    pub nod_jitter: f32,
    pub nod_speed: f32,
    pub nod_hold: Range,
    pub center_speed: f32,
    pub center_hold: Range,
    /// Return speed once speech stops
    pub idle_return_speed: f32,
}

impl Default for HeadSaccadeConfig {
    fn default() -> Self {
        Self {
            outcomes: ProbabilityTable::new(&[
                (0.4, HeadSaccadeKind::GlanceAside),
                (0.2, HeadSaccadeKind::Nod),
                (0.4, HeadSaccadeKind::Center),
            ]),
            glance_angle: Range::new(1.5, 3.5),
            glance_jitter: 0.5,
            glance_speed: 8.0,
            glance_hold: Range::new(2.0, 6.0),
            nod_angle: Range::new(1.5, 3.5),
            nod_jitter: 0.5,
            nod_speed: 10.0,
            nod_hold: Range::new(1.2, 3.2),
            center_speed: 2.0,
            center_hold: Range::new(4.0, 8.0),
            idle_return_speed: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    pub enabled: bool,
    pub stabilization: f32,
    pub drift_magnitude: f32,
    /// Drift noise time scale, relative to the sway speed
    pub drift_speed: f32,
    pub drift_weights: AxisWeights,
    pub jitter_frequency: f32,
    pub jitter_gain: f32,
    pub jitter_arousal_gain: f32,
    pub jitter_weights: AxisWeights,
    pub saccade: HeadSaccadeConfig,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stabilization: HEAD_STABILIZATION,
            drift_magnitude: 1.0,
            drift_speed: SWAY_SPEED,
            drift_weights: AxisWeights::new(0.5, 1.0, 0.3),
            jitter_frequency: JITTER_FREQUENCY,
            jitter_gain: 1.2,
            jitter_arousal_gain: 0.5,
            jitter_weights: AxisWeights::new(1.0, 0.25, 0.5),
            saccade: HeadSaccadeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    pub enabled: bool,
    /// Down-rotation from the T-pose in degrees
    pub base_angle: f32,
    pub heave_amplitude: f32,
    pub heave_speed: f32,
    pub gesture_frequency: f32,
    /// Noise bias so gestures lift more than they drop
    pub gesture_bias: f32,
    pub gesture_amplitude: f32,
    pub idle_weight: f32,
    pub speaking_weight: f32,
    pub drift_rate: f32,
    pub drift_amplitude: f32,
    pub smoothing_rate: f32,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_angle: ARM_BASE_ANGLE,
            heave_amplitude: 2.0,
            heave_speed: BREATH_BASE_SPEED,
            gesture_frequency: 6.0,
            gesture_bias: 0.2,
            gesture_amplitude: 10.0,
            idle_weight: 0.2,
            speaking_weight: 1.0,
            drift_rate: 0.2,
            drift_amplitude: 5.0,
            smoothing_rate: ARM_SMOOTHING_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    pub state_hold: Range,
    /// Overall wander amplitude in degrees
    pub amount: f32,
    pub yaw_scale: f32,
    pub pitch_scale: f32,
    pub fixation_hold: Range,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            state_hold: Range::new(3.0, 8.0),
            amount: 2.0,
            yaw_scale: 0.9,
            pitch_scale: 0.6,
            fixation_hold: Range::new(0.8, 6.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlanceConfig {
    pub state_hold: Range,
    pub target: GazePoint,
    pub jitter: f32,
    pub fixation_hold: Range,
}

impl Default for GlanceConfig {
    fn default() -> Self {
        Self {
            state_hold: Range::new(2.0, 4.0),
            target: GazePoint::new(5.0, -15.0),
            jitter: 1.0,
            fixation_hold: Range::new(2.0, 4.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub state_hold: Range,
    /// Yaw past which the sweep returns to a new line (sweep runs toward negative yaw)
    pub line_end_yaw: f32,
    pub line_start_yaw: Range,
    pub line_pitch: Range,
    pub return_hold: Range,
    pub step: Range,
    pub step_pitch_jitter: f32,
    pub step_hold: Range,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            state_hold: Range::new(2.0, 4.0),
            line_end_yaw: -5.0,
            line_start_yaw: Range::new(5.0, 9.0),
            line_pitch: Range::new(-2.0, 2.0),
            return_hold: Range::fixed(0.8),
            step: Range::new(2.0, 4.0),
            step_pitch_jitter: 0.5,
            step_hold: Range::new(0.3, 0.6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub enabled: bool,
    pub transitions: ProbabilityTable<GazeState>,
    pub wander: WanderConfig,
    pub glance: GlanceConfig,
    pub scan: ScanConfig,
    pub smoothing_rate: f32,
    pub max_outward: f32,
    pub max_inward: f32,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            transitions: ProbabilityTable::new(&[
                (0.70, GazeState::Wander),
                (0.15, GazeState::Glance),
                (0.15, GazeState::Scan),
            ]),
            wander: WanderConfig::default(),
            glance: GlanceConfig::default(),
            scan: ScanConfig::default(),
            smoothing_rate: GAZE_SMOOTHING_RATE,
            max_outward: EYE_MAX_OUTWARD,
            max_inward: EYE_MAX_INWARD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    pub enabled: bool,
    pub base_interval: f32,
    pub close_duration: f32,
    pub open_duration: f32,
    pub hold: Range,
    pub flutter_chance: f32,
    pub flutter_pause: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_interval: BLINK_BASE_INTERVAL,
            close_duration: BLINK_CLOSE_DURATION,
            open_duration: BLINK_OPEN_DURATION,
            hold: Range::new(0.01, 0.05),
            flutter_chance: BLINK_FLUTTER_CHANCE,
            flutter_pause: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Intensity above which the avatar counts as speaking
    pub threshold: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            threshold: SPEECH_THRESHOLD,
        }
    }
}

/// Director emotion name and the expression key it drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionBinding {
    pub name: String,
    pub expression: String,
}

impl EmotionBinding {
    pub fn new(name: &str, expression: &str) -> Self {
        Self {
            name: name.to_string(),
            expression: expression.to_string(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub breathing: BreathingConfig,
    pub sway: SwayConfig,
    pub head: HeadConfig,
    pub arms: ArmConfig,
    pub gaze: GazeConfig,
    pub blink: BlinkConfig,
    pub speech: SpeechConfig,
    pub emotions: Vec<EmotionBinding>,
    /// Emotion names addressed by numeric director IDs, in ID order
    pub emotion_ids: Vec<String>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            breathing: BreathingConfig::default(),
            sway: SwayConfig::default(),
            head: HeadConfig::default(),
            arms: ArmConfig::default(),
            gaze: GazeConfig::default(),
            blink: BlinkConfig::default(),
            speech: SpeechConfig::default(),
            emotions: vec![
                EmotionBinding::new("neutral", "neutral"),
                EmotionBinding::new("joy", "happy"),
                EmotionBinding::new("angry", "angry"),
                EmotionBinding::new("sorrow", "sad"),
                EmotionBinding::new("fun", "relaxed"),
                EmotionBinding::new("surprise", "surprised"),
            ],
            emotion_ids: ["neutral", "joy", "angry", "sorrow", "fun"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl MotionConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the generators cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.breathing;
        finite("breathing.base_speed", b.base_speed)?;
        finite("breathing.base_intensity", b.base_intensity)?;
        finite("breathing.noise_rate", b.noise_rate)?;
        non_negative("breathing.speaking_boost", b.speaking_boost)?;

        let s = &self.sway;
        finite("sway.base_magnitude", s.base_magnitude)?;
        finite("sway.speed", s.speed)?;
        non_negative("sway.speaking_boost", s.speaking_boost)?;
        s.spine_weights.check("sway.spine_weights")?;
        s.chest_weights.check("sway.chest_weights")?;

        let h = &self.head;
        unit("head.stabilization", h.stabilization)?;
        finite("head.drift_magnitude", h.drift_magnitude)?;
        finite("head.drift_speed", h.drift_speed)?;
        h.drift_weights.check("head.drift_weights")?;
        finite("head.jitter_frequency", h.jitter_frequency)?;
        finite("head.jitter_gain", h.jitter_gain)?;
        finite("head.jitter_arousal_gain", h.jitter_arousal_gain)?;
        h.jitter_weights.check("head.jitter_weights")?;
        let hs = &h.saccade;
        hs.outcomes.check("head.saccade.outcomes")?;
        hs.glance_angle.check("head.saccade.glance_angle")?;
        hs.glance_hold.check("head.saccade.glance_hold")?;
        hs.nod_angle.check("head.saccade.nod_angle")?;
        hs.nod_hold.check("head.saccade.nod_hold")?;
        hs.center_hold.check("head.saccade.center_hold")?;
        finite("head.saccade.glance_jitter", hs.glance_jitter)?;
        finite("head.saccade.nod_jitter", hs.nod_jitter)?;
        non_negative("head.saccade.glance_speed", hs.glance_speed)?;
        non_negative("head.saccade.nod_speed", hs.nod_speed)?;
        non_negative("head.saccade.center_speed", hs.center_speed)?;
        non_negative("head.saccade.idle_return_speed", hs.idle_return_speed)?;
        positive("head.saccade.center_hold.max", hs.center_hold.max)?;

        let a = &self.arms;
        finite("arms.base_angle", a.base_angle)?;
        finite("arms.heave_amplitude", a.heave_amplitude)?;
        finite("arms.heave_speed", a.heave_speed)?;
        finite("arms.gesture_frequency", a.gesture_frequency)?;
        finite("arms.gesture_bias", a.gesture_bias)?;
        finite("arms.gesture_amplitude", a.gesture_amplitude)?;
        finite("arms.idle_weight", a.idle_weight)?;
        finite("arms.speaking_weight", a.speaking_weight)?;
        finite("arms.drift_rate", a.drift_rate)?;
        finite("arms.drift_amplitude", a.drift_amplitude)?;
        non_negative("arms.smoothing_rate", a.smoothing_rate)?;

        let g = &self.gaze;
        g.transitions.check("gaze.transitions")?;
        g.wander.state_hold.check("gaze.wander.state_hold")?;
        g.wander.fixation_hold.check("gaze.wander.fixation_hold")?;
        finite("gaze.wander.amount", g.wander.amount)?;
        finite("gaze.wander.yaw_scale", g.wander.yaw_scale)?;
        finite("gaze.wander.pitch_scale", g.wander.pitch_scale)?;
        g.glance.state_hold.check("gaze.glance.state_hold")?;
        g.glance.fixation_hold.check("gaze.glance.fixation_hold")?;
        finite("gaze.glance.target.pitch", g.glance.target.pitch)?;
        finite("gaze.glance.target.yaw", g.glance.target.yaw)?;
        finite("gaze.glance.jitter", g.glance.jitter)?;
        g.scan.state_hold.check("gaze.scan.state_hold")?;
        g.scan.line_start_yaw.check("gaze.scan.line_start_yaw")?;
        g.scan.line_pitch.check("gaze.scan.line_pitch")?;
        g.scan.return_hold.check("gaze.scan.return_hold")?;
        g.scan.step.check("gaze.scan.step")?;
        g.scan.step_hold.check("gaze.scan.step_hold")?;
        finite("gaze.scan.line_end_yaw", g.scan.line_end_yaw)?;
        finite("gaze.scan.step_pitch_jitter", g.scan.step_pitch_jitter)?;
        non_negative("gaze.smoothing_rate", g.smoothing_rate)?;
        non_negative("gaze.max_outward", g.max_outward)?;
        non_negative("gaze.max_inward", g.max_inward)?;

        let k = &self.blink;
        positive("blink.base_interval", k.base_interval)?;
        positive("blink.close_duration", k.close_duration)?;
        positive("blink.open_duration", k.open_duration)?;
        k.hold.check("blink.hold")?;
        non_negative("blink.hold.min", k.hold.min)?;
        unit("blink.flutter_chance", k.flutter_chance)?;
        non_negative("blink.flutter_pause", k.flutter_pause)?;

        unit("speech.threshold", self.speech.threshold)?;

        if self.emotions.iter().any(|e| e.name.is_empty() || e.expression.is_empty()) {
            return Err(ConfigError::invalid("emotions", "names and expressions must be non-empty"));
        }
        for id_name in &self.emotion_ids {
            if !self.emotions.iter().any(|e| &e.name == id_name) {
                return Err(ConfigError::invalid(
                    "emotion_ids",
                    format!("`{id_name}` is not a configured emotion"),
                ));
            }
        }
        Ok(())
    }
}

fn finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite"))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(())
}

fn unit(field: &str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid(field, format!("must be within [0, 1], got {value}")));
    }
    Ok(())
}
