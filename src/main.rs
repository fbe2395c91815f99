//! idlerig CLI - fixed-step motion simulator
//!
//! Usage:
//!   idlerig                                   # 10 s idle at 60 fps
//!   idlerig --speaking --arousal 0.9          # Animated talker
//!   idlerig --debug-speech 1.0 --seconds 1    # Force speech intensity
//!   idlerig --cues scene.cues --json          # Scripted director, JSON lines
//!   idlerig --seed 7 --fingerprint            # Trajectory hash only

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use idlerig::core::telemetry::DEFAULT_FILTER;
use idlerig::core::{init_tracing, CueTimeline, MemoryRig, MotionEngine, TrajectoryDigest};
use idlerig::types::{MotionConfig, RunSummary};
use idlerig::{DEFAULT_AROUSAL, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "idlerig",
    version = VERSION,
    about = "idlerig - Simulate autonomous idle and speech motion on a humanoid rig",
    long_about = "idlerig drives an in-memory humanoid rig with the motion engine at a\n\
                  fixed time step and prints what every frame decided.\n\n\
                  Layers:\n  \
                  breathing  chest heave\n  \
                  sway       spine/chest lean, counter-rotated by the head\n  \
                  head       stabilization, speech saccades, drift, jitter\n  \
                  arms       rest-down posture, heave and speech gestures\n  \
                  gaze       WANDER / GLANCE / SCAN fixations\n  \
                  blink      close, hold, open, wait"
)]
struct Args {
    /// Simulated duration in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for noise and random timers
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Arousal in [0, 1]
    #[arg(long, default_value_t = DEFAULT_AROUSAL)]
    arousal: f32,

    /// Director speaking flag
    #[arg(long)]
    speaking: bool,

    /// Emotion to apply before the first frame
    #[arg(long)]
    emotion: Option<String>,

    /// Override speech intensity with this value
    #[arg(long, value_name = "VALUE")]
    debug_speech: Option<f32>,

    /// JSON config file (missing fields keep defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Director cue script
    #[arg(long, value_name = "FILE")]
    cues: Option<PathBuf>,

    /// Print every n-th frame
    #[arg(long, default_value_t = 30)]
    every: u64,

    /// Output frames and summary as JSON lines
    #[arg(long)]
    json: bool,

    /// Print only the trajectory fingerprint
    #[arg(long)]
    fingerprint: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging and a detailed summary
    #[arg(long)]
    verbose: bool,

    /// Rig without blink shapes or expressions
    #[arg(long)]
    no_face: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "idlerig=debug" } else { DEFAULT_FILTER };
    if let Err(e) = init_tracing(filter) {
        eprintln!("warning: {}", e);
    }
    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Run the simulation described by `args`
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => MotionConfig::load(path)?,
        None => MotionConfig::default(),
    };
    let rig = if args.no_face {
        MemoryRig::humanoid().without_face()
    } else {
        MemoryRig::humanoid()
    };
    let mut engine = MotionEngine::new(rig, config, args.seed)?;
    let mut timeline = match &args.cues {
        Some(path) => CueTimeline::load(path)?,
        None => CueTimeline::default(),
    };

    engine.set_arousal(args.arousal);
    engine.set_speaking_state(args.speaking);
    if let Some(emotion) = &args.emotion {
        engine.set_emotion(emotion);
    }
    if let Some(value) = args.debug_speech {
        engine.set_debug_speech(true, value);
    }

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let frames = (args.seconds.max(0.0) * fps as f32).round() as u64;
    let every = args.every.max(1);
    let quiet = args.fingerprint;

    if !args.json && !quiet {
        print_header(args, frames, fps);
    }

    let mut digest = TrajectoryDigest::new();
    for _ in 0..frames {
        timeline.apply_due(engine.time(), &mut engine);
        let out = engine.advance(dt);
        digest.update(&out);

        if quiet || (out.frame % every != 0 && out.frame != 1) {
            continue;
        }
        if args.json {
            println!("{}", serde_json::to_string(&out)?);
        } else if args.no_color {
            println!("{}", out.to_parseable_string());
        } else {
            println!("{}", out.to_terminal_string());
        }
    }

    let summary = RunSummary::new(
        args.seed,
        engine.time(),
        engine.signals().emotion.clone(),
        engine.stats(),
        digest.finish_hex(),
    );

    if quiet {
        println!("{}", summary.fingerprint);
    } else if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else if args.verbose {
        print_verbose_summary(&summary, &engine);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_header(args: &Args, frames: u64, fps: u32) {
    println!();
    println!("{}", format!("idlerig {}", VERSION).bold());
    println!(
        "{} frames at {} fps | seed={} | arousal={:.2} | speaking={}",
        frames, fps, args.seed, args.arousal, args.speaking
    );
    println!();
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "{} {:.2}s | {} frames | {} blinks | {} head saccades | {} gaze transitions",
        "done".green().bold(),
        summary.simulated_secs,
        summary.stats.frames,
        summary.stats.blinks,
        summary.stats.head_saccades,
        summary.stats.gaze_transitions,
    );
    println!("fingerprint {}", summary.fingerprint.dimmed());
}

fn print_verbose_summary(summary: &RunSummary, engine: &MotionEngine<MemoryRig>) {
    let signals = engine.signals();
    println!();
    println!("┌─────────────────────────────────────────┐");
    println!("│ Run started {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("│ Seed: {} | Simulated: {:.2}s", summary.seed, summary.simulated_secs);
    println!("├─────────────────────────────────────────┤");
    println!("│ Signals:");
    println!("│   emotion:       {}", signals.emotion);
    println!("│   arousal:       {:.2}", signals.arousal);
    println!("│   speaking:      {}", signals.is_speaking);
    println!(
        "│   debug speech:  {} ({:.2})",
        signals.debug_speech_override, signals.debug_speech_value
    );
    println!("├─────────────────────────────────────────┤");
    println!("│ Events:");
    println!("│   frames:           {}", summary.stats.frames);
    println!("│   blinks:           {}", summary.stats.blinks);
    println!("│   head saccades:    {}", summary.stats.head_saccades);
    println!("│   gaze transitions: {}", summary.stats.gaze_transitions);
    println!("│   gaze fixations:   {}", summary.stats.gaze_fixations);
    println!("├─────────────────────────────────────────┤");
    let missing = engine.adapter().missing_targets();
    if missing.is_empty() {
        println!("│ Rig: all targets resolved");
    } else {
        println!("│ Rig: {} missing target(s)", missing.len());
        for target in missing {
            println!("│   {} {}", target.reason.code().yellow(), target.name);
        }
    }
    println!("├─────────────────────────────────────────┤");
    println!("│ Fingerprint: {}", summary.fingerprint);
    println!("└─────────────────────────────────────────┘");
}
