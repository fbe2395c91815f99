//! Core types for idlerig

mod blink;
mod bones;
mod config;
mod error;
mod gaze;
mod output;
mod reason;
pub mod rotation;
mod signals;

pub use blink::{BlinkCycle, BlinkPhase};
pub use bones::{BlinkShape, Bone, VOWEL_KEYS};
pub use config::{
    ArmConfig, AxisWeights, BlinkConfig, BreathingConfig, EmotionBinding, GazeConfig, GlanceConfig,
    HeadConfig, HeadSaccadeConfig, MotionConfig, ProbabilityTable, Range, ScanConfig, SpeechConfig,
    SwayConfig, WanderConfig, Weighted,
};
pub use error::{ConfigError, CueError, TelemetryError};
pub use gaze::{GazePoint, GazeState, HeadSaccadeKind};
pub use output::{EngineStats, FrameOutput, RunSummary};
pub use reason::ReasonCode;
pub use rotation::Rotation;
pub use signals::{sanitize_dt, sanitize_unit, speaking_from_level, ControlSignals, Tick};
