//! Reason codes for non-fatal outcomes
//!
//! Nothing in the frame pass is fatal; setup and director calls report
//! what happened through these codes instead.

use serde::{Deserialize, Serialize};

/// Reason codes for degraded targets and director calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // M001: Rig resolution
    // =========================================================================
    /// Bone not found; its writes are skipped for the rig's lifetime
    M001_BONE_MISSING,
    /// Blend shape not found under canonical name or alias
    M001_BLEND_SHAPE_MISSING,

    // =========================================================================
    // M002: Emotion
    // =========================================================================
    /// Emotion changed and forwarded to the expression subsystem
    M002_EMOTION_APPLIED,
    /// Requested emotion is already active
    M002_EMOTION_UNCHANGED,
    /// Emotion name or ID not in the table
    M002_UNKNOWN_EMOTION,

    // =========================================================================
    // M003: Control signals
    // =========================================================================
    /// Value stored as given
    M003_SIGNAL_ACCEPTED,
    /// Value was NaN or out of range and got clamped
    M003_SIGNAL_SANITIZED,

    // =========================================================================
    // M004: Debug speech override
    // =========================================================================
    /// Override active; its value replaces the sampled speech intensity
    M004_DEBUG_SPEECH_ON,
    /// Override released; speech intensity comes from the vowels again
    M004_DEBUG_SPEECH_OFF,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::M001_BONE_MISSING => "M001_BONE_MISSING",
            Self::M001_BLEND_SHAPE_MISSING => "M001_BLEND_SHAPE_MISSING",
            Self::M002_EMOTION_APPLIED => "M002_EMOTION_APPLIED",
            Self::M002_EMOTION_UNCHANGED => "M002_EMOTION_UNCHANGED",
            Self::M002_UNKNOWN_EMOTION => "M002_UNKNOWN_EMOTION",
            Self::M003_SIGNAL_ACCEPTED => "M003_SIGNAL_ACCEPTED",
            Self::M003_SIGNAL_SANITIZED => "M003_SIGNAL_SANITIZED",
            Self::M004_DEBUG_SPEECH_ON => "M004_DEBUG_SPEECH_ON",
            Self::M004_DEBUG_SPEECH_OFF => "M004_DEBUG_SPEECH_OFF",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::M001_BONE_MISSING => "Bone not found, writes skipped",
            Self::M001_BLEND_SHAPE_MISSING => "Blend shape not found, writes skipped",
            Self::M002_EMOTION_APPLIED => "Emotion applied",
            Self::M002_EMOTION_UNCHANGED => "Emotion already active",
            Self::M002_UNKNOWN_EMOTION => "Unknown emotion, state unchanged",
            Self::M003_SIGNAL_ACCEPTED => "Signal accepted",
            Self::M003_SIGNAL_SANITIZED => "Signal clamped into range",
            Self::M004_DEBUG_SPEECH_ON => "Debug speech override on",
            Self::M004_DEBUG_SPEECH_OFF => "Debug speech override off",
        }
    }

    /// Is this logged at warn level?
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::M001_BONE_MISSING
                | Self::M001_BLEND_SHAPE_MISSING
                | Self::M002_UNKNOWN_EMOTION
                | Self::M003_SIGNAL_SANITIZED
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
