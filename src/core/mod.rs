//! Core modules for idlerig

pub mod arms;
pub mod blink;
pub mod breathing;
pub mod cues;
pub mod digest;
pub mod engine;
pub mod gaze;
pub mod head;
pub mod memory_rig;
pub mod random;
pub mod rig;
pub mod speech;
pub mod sway;
pub mod telemetry;

pub use arms::{ArmGestureModulator, ArmSample};
pub use blink::BlinkScheduler;
pub use breathing::BreathingOscillator;
pub use cues::{Cue, CueCommand, CueTimeline, EmotionRef, SpeechCue};
pub use digest::TrajectoryDigest;
pub use engine::{Feature, MotionEngine};
pub use gaze::{GazeSample, GazeStateMachine};
pub use head::{HeadMotionComposer, HeadSample};
pub use memory_rig::MemoryRig;
pub use random::{MotionRng, NoiseSource};
pub use rig::{BoneId, ExpressionId, MissingTarget, Rig, RigAdapter};
pub use speech::{SpeechIntensitySampler, SpeechSample};
pub use sway::{SwayOscillator, SwaySample};
pub use telemetry::init_tracing;
