//! idlerig: autonomous idle and speech-reactive motion for avatar rigs
//!
//! Call `MotionEngine::advance(dt)` once per frame, after the host's
//! pose-animation pass, and the engine layers breathing, sway, head
//! stabilization, gaze saccades, blinking and arm micro-gestures on top
//! of the captured rest pose.

pub mod core;
pub mod types;

// =============================================================================
// BREATHING - chest heave
// =============================================================================

/// Base phase rate (radians per second before modulation)
pub const BREATH_BASE_SPEED: f32 = 1.0;

/// Peak chest pitch in degrees at arousal 1.0 and neutral noise
pub const BREATH_BASE_INTENSITY: f32 = 1.0;

/// Noise sample rate for speed/intensity modulation
pub const BREATH_NOISE_RATE: f32 = 0.1;

// =============================================================================
// SWAY - spine and chest
// =============================================================================

/// Base sway magnitude (degrees scale before per-axis weights)
pub const SWAY_BASE_MAGNITUDE: f32 = 0.6;

/// Noise time scale for sway
pub const SWAY_SPEED: f32 = 0.5;

/// Magnitude multiplier while speaking (shared with breathing rate)
pub const SPEAKING_BOOST: f32 = 1.2;

// =============================================================================
// HEAD
// =============================================================================

/// Fraction of the inverse torso sway applied to the head (0 = limp, 1 = gyro)
pub const HEAD_STABILIZATION: f32 = 0.5;

/// Speech intensity above which the avatar counts as speaking
pub const SPEECH_THRESHOLD: f32 = 0.05;

/// Noise time scale for speech jitter
pub const JITTER_FREQUENCY: f32 = 12.5;

// =============================================================================
// ARMS
// =============================================================================

/// Down-rotation from the T-pose in degrees (mirrored per side)
pub const ARM_BASE_ANGLE: f32 = 65.0;

/// Exponential smoothing rate toward the arm target (per second)
pub const ARM_SMOOTHING_RATE: f32 = 5.0;

// =============================================================================
// GAZE
// =============================================================================

/// Exponential smoothing rate of the eyes toward the fixation point
pub const GAZE_SMOOTHING_RATE: f32 = 25.0;

/// Maximum outward eye yaw in degrees
pub const EYE_MAX_OUTWARD: f32 = 8.0;

/// Maximum inward eye yaw in degrees
pub const EYE_MAX_INWARD: f32 = 30.0;

// =============================================================================
// BLINK
// =============================================================================

/// Mean seconds between blinks at arousal 0
pub const BLINK_BASE_INTERVAL: f32 = 3.0;

/// Closing ramp duration in seconds
pub const BLINK_CLOSE_DURATION: f32 = 0.08;

/// Opening ramp duration in seconds
pub const BLINK_OPEN_DURATION: f32 = 0.08;

/// Probability of an immediate second blink
pub const BLINK_FLUTTER_CHANCE: f32 = 0.2;

/// Fully closed blend-shape weight
pub const BLINK_WEIGHT_MAX: f32 = 100.0;

// =============================================================================
// CONTROL DEFAULTS
// =============================================================================

/// Arousal before the director says anything
pub const DEFAULT_AROUSAL: f32 = 0.5;

/// Emotion active at startup
pub const DEFAULT_EMOTION: &str = "neutral";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
