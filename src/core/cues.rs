//! Director cue scripts: timed control-signal changes
//!
//! One cue per line, `#` starts a comment:
//!
//! ```text
//! 0.0  emotion joy
//! 1.5  emotion 2
//! 2.0  arousal 0.8
//! 2.0  speech on
//! 4.0  speech 0.2
//! 5.0  debug-speech on 0.9
//! 7.5  debug-speech off
//! ```

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::engine::MotionEngine;
use crate::core::rig::Rig;
use crate::types::CueError;

lazy_static! {
    // <seconds> <command> [args...]
    static ref RE_CUE: Regex = Regex::new(
        r"^(?P<time>\d+(?:\.\d+)?)\s+(?P<command>[a-z][a-z-]*)(?:\s+(?P<args>\S.*))?$"
    ).unwrap();

    static ref RE_NUMBER: Regex = Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap();

    static ref RE_INTEGER: Regex = Regex::new(r"^-?\d+$").unwrap();
}

/// Emotion addressed by name or numeric director ID
#[derive(Debug, Clone, PartialEq)]
pub enum EmotionRef {
    Name(String),
    Id(i32),
}

/// Speech cue: a boolean flag or a numeric level (> 0.5 speaks)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeechCue {
    Flag(bool),
    Level(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CueCommand {
    Emotion(EmotionRef),
    Arousal(f32),
    Speech(SpeechCue),
    DebugSpeech { active: bool, value: f32 },
}

/// A command scheduled at a point on the engine clock
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub at: f64,
    pub command: CueCommand,
}

impl Cue {
    /// Forward this cue to the engine's director API
    pub fn apply<R: Rig>(&self, engine: &mut MotionEngine<R>) {
        match &self.command {
            CueCommand::Emotion(EmotionRef::Name(name)) => {
                engine.set_emotion(name);
            }
            CueCommand::Emotion(EmotionRef::Id(id)) => {
                engine.set_emotion_id(*id);
            }
            CueCommand::Arousal(value) => {
                engine.set_arousal(*value);
            }
            CueCommand::Speech(SpeechCue::Flag(on)) => engine.set_speaking_state(*on),
            CueCommand::Speech(SpeechCue::Level(level)) => engine.set_speaking_level(*level),
            CueCommand::DebugSpeech { active, value } => {
                engine.set_debug_speech(*active, *value);
            }
        }
    }
}

/// Parse one non-empty, comment-free line
fn parse_line(line: usize, text: &str) -> Result<Cue, CueError> {
    let caps = RE_CUE.captures(text).ok_or_else(|| CueError::Syntax {
        line,
        text: text.to_string(),
    })?;
    let at: f64 = caps["time"].parse().map_err(|_| CueError::Syntax {
        line,
        text: text.to_string(),
    })?;
    let command = &caps["command"];
    let args: Vec<&str> = caps
        .name("args")
        .map(|m| m.as_str().split_whitespace().collect())
        .unwrap_or_default();

    let bad_value = || CueError::BadValue {
        line,
        command: command.to_string(),
        value: args.join(" "),
    };

    let parsed = match (command, args.as_slice()) {
        ("emotion", [value]) if RE_INTEGER.is_match(value) => {
            let id = value.parse().map_err(|_| bad_value())?;
            CueCommand::Emotion(EmotionRef::Id(id))
        }
        ("emotion", [name]) => CueCommand::Emotion(EmotionRef::Name(name.to_string())),
        ("arousal", [value]) => CueCommand::Arousal(parse_number(value).ok_or_else(bad_value)?),
        ("speech", ["on"]) => CueCommand::Speech(SpeechCue::Flag(true)),
        ("speech", ["off"]) => CueCommand::Speech(SpeechCue::Flag(false)),
        ("speech", [value]) => {
            CueCommand::Speech(SpeechCue::Level(parse_number(value).ok_or_else(bad_value)?))
        }
        ("debug-speech", ["on"]) => CueCommand::DebugSpeech {
            active: true,
            value: 1.0,
        },
        ("debug-speech", ["on", value]) => CueCommand::DebugSpeech {
            active: true,
            value: parse_number(value).ok_or_else(bad_value)?,
        },
        ("debug-speech", ["off"]) => CueCommand::DebugSpeech {
            active: false,
            value: 0.0,
        },
        ("emotion" | "arousal" | "speech" | "debug-speech", _) => return Err(bad_value()),
        (other, _) => {
            return Err(CueError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };
    Ok(Cue { at, command: parsed })
}

fn parse_number(text: &str) -> Option<f32> {
    if RE_NUMBER.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Cues sorted by time, applied as the engine clock passes them
#[derive(Debug, Clone, Default)]
pub struct CueTimeline {
    cues: Vec<Cue>,
    next: usize,
}

impl CueTimeline {
    pub fn new(mut cues: Vec<Cue>) -> Self {
        // Stable sort keeps file order for cues at the same time
        cues.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { cues, next: 0 }
    }

    /// Parse a whole script; the first bad line aborts with its line number
    pub fn parse(script: &str) -> Result<Self, CueError> {
        let mut cues = Vec::new();
        for (index, raw) in script.lines().enumerate() {
            let text = raw.split('#').next().unwrap_or_default().trim();
            if text.is_empty() {
                continue;
            }
            cues.push(parse_line(index + 1, text)?);
        }
        Ok(Self::new(cues))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CueError> {
        let path = path.as_ref();
        let script = std::fs::read_to_string(path).map_err(|e| CueError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&script)
    }

    /// Apply every pending cue at or before `time`; returns how many fired
    pub fn apply_due<R: Rig>(&mut self, time: f64, engine: &mut MotionEngine<R>) -> usize {
        let start = self.next;
        while let Some(cue) = self.cues.get(self.next) {
            if cue.at > time {
                break;
            }
            cue.apply(engine);
            self.next += 1;
        }
        self.next - start
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// All cues applied
    pub fn is_finished(&self) -> bool {
        self.next >= self.cues.len()
    }

    /// Time of the last cue, 0 for an empty timeline
    pub fn end_time(&self) -> f64 {
        self.cues.last().map(|c| c.at).unwrap_or(0.0)
    }

    pub fn rewind(&mut self) {
        self.next = 0;
    }
}

// =============================================================================
// TESTS
// =============================================================================
