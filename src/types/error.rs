//! Error types for fallible setup paths (config files, cue scripts)
//!
//! The per-frame pass never fails; see `ReasonCode` for the non-fatal
//! outcomes it reports instead.

use thiserror::Error;

/// Errors raised while loading or validating a `MotionConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while parsing a director cue script
#[derive(Error, Debug, PartialEq)]
pub enum CueError {
    #[error("line {line}: cannot parse `{text}`")]
    Syntax { line: usize, text: String },
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: bad value `{value}` for {command}")]
    BadValue {
        line: usize,
        command: String,
        value: String,
    },
    #[error("failed to read cue script {path}: {message}")]
    Io { path: String, message: String },
}

/// Errors raised while installing the tracing subscriber
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("tracing has already been initialised")]
    AlreadyInitialised,
    #[error("invalid log filter `{filter}`: {message}")]
    Filter { filter: String, message: String },
    #[error("another global subscriber is installed: {0}")]
    Install(String),
}
