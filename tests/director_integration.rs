//! Integration tests for the director surface
//!
//! Tests: emotion switching, signal sanitizing, cue scripts, feature toggles

use idlerig::core::{CueTimeline, Feature, MemoryRig, MotionEngine};
use idlerig::types::{Bone, MotionConfig, ReasonCode};
use pretty_assertions::assert_eq;

const DT: f32 = 1.0 / 60.0;

const EXPRESSIONS: [&str; 6] = ["neutral", "happy", "angry", "sad", "relaxed", "surprised"];

fn engine() -> MotionEngine<MemoryRig> {
    MotionEngine::new(MemoryRig::humanoid(), MotionConfig::default(), 42).unwrap()
}

fn expression_weights(engine: &MotionEngine<MemoryRig>) -> Vec<f32> {
    EXPRESSIONS
        .iter()
        .map(|key| engine.rig().expression(key).unwrap())
        .collect()
}

// =============================================================================
// EMOTION
// =============================================================================

/// Switching emotion drives exactly one expression to full weight
#[test]
fn test_emotion_switch_is_exclusive() {
    let mut engine = engine();
    assert_eq!(engine.set_emotion("joy"), ReasonCode::M002_EMOTION_APPLIED);
    assert_eq!(engine.signals().emotion, "joy");
    assert_eq!(expression_weights(&engine), vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

    assert_eq!(engine.set_emotion("sorrow"), ReasonCode::M002_EMOTION_APPLIED);
    assert_eq!(expression_weights(&engine), vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
}

/// Re-applying the active emotion touches nothing
#[test]
fn test_same_emotion_short_circuits() {
    let mut engine = engine();
    assert_eq!(engine.set_emotion("neutral"), ReasonCode::M002_EMOTION_UNCHANGED);
    assert_eq!(engine.rig().expression_writes(), 0);

    engine.set_emotion("angry");
    let writes = engine.rig().expression_writes();
    assert!(writes > 0);
    assert_eq!(engine.set_emotion("angry"), ReasonCode::M002_EMOTION_UNCHANGED);
    assert_eq!(engine.rig().expression_writes(), writes);
}

/// Unknown emotions are reported and leave the current one in place
#[test]
fn test_unknown_emotion_keeps_current() {
    let mut engine = engine();
    engine.set_emotion("fun");
    let writes = engine.rig().expression_writes();

    assert_eq!(engine.set_emotion("bored"), ReasonCode::M002_UNKNOWN_EMOTION);
    assert_eq!(engine.signals().emotion, "fun");
    assert_eq!(engine.rig().expression_writes(), writes);
    assert_eq!(engine.rig().expression("relaxed"), Some(1.0));
}

/// Numeric IDs index the configured emotion list
#[test]
fn test_emotion_by_id() {
    let mut engine = engine();
    assert_eq!(engine.set_emotion_id(3), ReasonCode::M002_EMOTION_APPLIED);
    assert_eq!(engine.signals().emotion, "sorrow");
    assert_eq!(engine.rig().expression("sad"), Some(1.0));

    assert_eq!(engine.set_emotion_id(-1), ReasonCode::M002_UNKNOWN_EMOTION);
    assert_eq!(engine.set_emotion_id(99), ReasonCode::M002_UNKNOWN_EMOTION);
    assert_eq!(engine.signals().emotion, "sorrow");
}

/// An emotion whose expression the rig lacks still clears the others
#[test]
fn test_emotion_without_expression() {
    let mut config = MotionConfig::default();
    config.emotions[1].expression = "grin".to_string();
    let mut engine = MotionEngine::new(MemoryRig::humanoid(), config, 1).unwrap();
    engine.rig_mut().set_expression("angry", 1.0);
    assert_eq!(engine.set_emotion("joy"), ReasonCode::M002_EMOTION_APPLIED);
    assert_eq!(engine.signals().emotion, "joy");
    assert_eq!(engine.rig().expression("angry"), Some(0.0));
    assert_eq!(engine.rig().expression("happy"), Some(0.0));
}

// =============================================================================
// SIGNALS
// =============================================================================

/// Arousal is clamped to [0, 1], NaN becomes 0
#[test]
fn test_arousal_sanitizing() {
    let mut engine = engine();
    assert_eq!(engine.set_arousal(0.4), ReasonCode::M003_SIGNAL_ACCEPTED);
    assert_eq!(engine.signals().arousal, 0.4);
    assert_eq!(engine.set_arousal(1.7), ReasonCode::M003_SIGNAL_SANITIZED);
    assert_eq!(engine.signals().arousal, 1.0);
    assert_eq!(engine.set_arousal(-3.0), ReasonCode::M003_SIGNAL_SANITIZED);
    assert_eq!(engine.signals().arousal, 0.0);
    assert_eq!(engine.set_arousal(f32::NAN), ReasonCode::M003_SIGNAL_SANITIZED);
    assert_eq!(engine.signals().arousal, 0.0);
}

/// Setting the same arousal twice changes nothing
#[test]
fn test_arousal_idempotent() {
    let mut engine = engine();
    engine.set_arousal(0.8);
    let first = engine.signals().clone();
    engine.set_arousal(0.8);
    assert_eq!(engine.signals(), &first);
}

/// Every frame reports the arousal it ran with
#[test]
fn test_frame_reports_arousal() {
    let mut engine = engine();
    engine.set_arousal(0.9);
    assert_eq!(engine.advance(DT).arousal, 0.9);
    engine.set_arousal(7.0);
    assert_eq!(engine.advance(DT).arousal, 1.0);
}

// =============================================================================
// CUE SCRIPTS
// =============================================================================

/// A script drives emotion, arousal and speech over a run
#[test]
fn test_cue_script_drives_engine() {
    let script = "\
0    emotion joy
1.0  arousal 0.9
1.0  speech on
2.0  debug-speech on 0.8
3.0  debug-speech off
3.0  speech off
4.0  emotion 2
";
    let mut timeline = CueTimeline::parse(script).unwrap();
    let mut engine = engine();
    let mut speaking_frames = 0;
    let mut debug_frames = 0;

    for _ in 0..300 {
        timeline.apply_due(engine.time(), &mut engine);
        let out = engine.advance(DT);
        if out.is_speaking {
            speaking_frames += 1;
        }
        if out.effectively_speaking {
            debug_frames += 1;
            assert!((out.speech_intensity - 0.8).abs() < 1e-6);
        }
    }

    assert!(timeline.is_finished());
    assert_eq!(engine.signals().emotion, "angry");
    assert_eq!(engine.signals().arousal, 0.9);
    assert!(!engine.signals().is_speaking);
    assert!(!engine.signals().debug_speech_override);
    // Two seconds of speaking flag, one of forced speech, give or take a frame
    assert!((119..=121).contains(&speaking_frames), "{speaking_frames}");
    assert!((59..=61).contains(&debug_frames), "{debug_frames}");
    assert!(engine.stats().head_saccades >= 1);
}

// =============================================================================
// FEATURE TOGGLES
// =============================================================================

/// A disabled generator stops writing its bones
#[test]
fn test_disabled_gaze_stops_eye_writes() {
    let mut engine = engine();
    for _ in 0..30 {
        engine.advance(DT);
    }
    engine.set_enabled(Feature::Gaze, false);
    assert!(!engine.is_enabled(Feature::Gaze));
    let frozen = engine.rig().bone_rotation("LeftEye").unwrap();
    for _ in 0..120 {
        let out = engine.advance(DT);
        assert_eq!(out.rotation(Bone::LeftEye), None);
    }
    assert_eq!(engine.rig().bone_rotation("LeftEye").unwrap(), frozen);

    engine.set_enabled(Feature::Gaze, true);
    let out = engine.advance(DT);
    assert!(out.rotation(Bone::LeftEye).is_some());
}

/// With blinking off the eyelids stay where they were
#[test]
fn test_disabled_blink() {
    let mut engine = engine();
    engine.set_enabled(Feature::Blink, false);
    for _ in 0..600 {
        assert_eq!(engine.advance(DT).blink_weight, 0.0);
    }
    assert_eq!(engine.stats().blinks, 0);
    assert_eq!(engine.rig().blend_shape_weight("Fcl_EYE_Close_L"), Some(0.0));
}
