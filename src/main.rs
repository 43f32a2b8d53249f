//! FingerPoint CLI
//!
//! Drives the gesture classifier from recorded hand-tracking output.

use chrono::Utc;
use clap::{Parser, Subcommand};
use fingerpoint::{
    config::Config,
    landmarks::{read_recording, ReplayConfig, ReplayFeed},
    stats::{create_shared_log_with_persistence, PersistedStats},
    GestureController, GestureEvent, RecordingSink, Viewport, GESTURE_GUIDE, VERSION,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fingerpoint")]
#[command(version = VERSION)]
#[command(about = "Hand-landmark gesture control for a pointer", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a recorded landmark stream (JSON Lines)
    Replay {
        /// Recording to replay
        file: PathBuf,

        /// Pace frames using their recorded timestamps
        #[arg(long)]
        realtime: bool,

        /// Playback speed multiplier for --realtime
        #[arg(long, default_value = "1.0")]
        speed: f64,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,

        /// Print the pointer action for each event in viewport pixels
        #[arg(long, conflicts_with = "json")]
        pixels: bool,

        /// Hide cursor move events from the output
        #[arg(long)]
        quiet_moves: bool,

        /// Export emitted events to the export directory
        #[arg(long)]
        export: bool,
    },

    /// Show cumulative statistics
    Status,

    /// Show configuration
    Config,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Turn gesture control on
    Enable,

    /// Turn gesture control off
    Disable,

    /// Display the gesture guide
    Guide,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Replay {
            file,
            realtime,
            speed,
            json,
            pixels,
            quiet_moves,
            export,
        } => {
            let options = ReplayOptions {
                realtime,
                speed,
                output: OutputMode::from_flags(json, pixels),
                quiet_moves,
                export,
            };
            cmd_replay(&file, &options);
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
        Commands::Init { force } => {
            cmd_init(force);
        }
        Commands::Enable => {
            cmd_set_enabled(true);
        }
        Commands::Disable => {
            cmd_set_enabled(false);
        }
        Commands::Guide => {
            println!("{GESTURE_GUIDE}");
        }
    }
}

/// Install the tracing subscriber. Logs go to stderr so event output stays pipeable.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "fingerpoint=debug"
    } else {
        "fingerpoint=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Clone, Copy)]
enum OutputMode {
    Text,
    Json,
    Pixels,
}

impl OutputMode {
    fn from_flags(json: bool, pixels: bool) -> Self {
        if json {
            OutputMode::Json
        } else if pixels {
            OutputMode::Pixels
        } else {
            OutputMode::Text
        }
    }
}

struct ReplayOptions {
    realtime: bool,
    speed: f64,
    output: OutputMode,
    quiet_moves: bool,
    export: bool,
}

/// An emitted event tagged with its frame time.
#[derive(Serialize)]
struct TimedEvent {
    t: u64,
    #[serde(flatten)]
    event: GestureEvent,
}

fn cmd_replay(file: &Path, options: &ReplayOptions) {
    if !(options.speed.is_finite() && options.speed > 0.0) {
        eprintln!("Error: --speed must be a positive number");
        std::process::exit(1);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.ensure_directories() {
        tracing::warn!("Could not create directories: {e}");
    }

    let frames = match read_recording(file) {
        Ok(frames) => frames,
        Err(e) => {
            eprintln!("Error reading {file:?}: {e}");
            std::process::exit(1);
        }
    };

    if !config.enabled {
        println!("Gesture control is disabled; frames will be ignored.");
        println!("Run `fingerpoint enable` to turn it on.");
    }

    let session_log = create_shared_log_with_persistence(config.data_path.join("stats.json"));
    tracing::info!(
        frames = frames.len(),
        realtime = options.realtime,
        session = %session_log.session_id(),
        "Replaying {}",
        file.display()
    );

    let mut controller = GestureController::new(config.thresholds.clone(), RecordingSink::new())
        .with_log(Arc::clone(&session_log));
    if !config.enabled {
        controller.disable();
    }

    let mut feed = ReplayFeed::new(
        frames,
        ReplayConfig {
            realtime: options.realtime,
            speed: options.speed,
            ..ReplayConfig::default()
        },
    );

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    ctrlc_handler(Arc::clone(&running));

    if let Err(e) = feed.start() {
        eprintln!("Error starting replay: {e}");
        std::process::exit(1);
    }

    let receiver = feed.receiver().clone();
    let mut exported: Vec<TimedEvent> = Vec::new();

    // Main frame loop
    while running.load(Ordering::SeqCst) {
        let (frame, now) = match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(item) => item,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        };

        controller.handle_frame(&frame, now);

        for event in controller.sink_mut().take_events() {
            print_event(&event, now.as_millis(), options, &config.viewport);
            if options.export {
                exported.push(TimedEvent {
                    t: now.as_millis(),
                    event,
                });
            }
        }
    }

    feed.stop();
    if feed.dropped_frames() > 0 {
        tracing::warn!(
            dropped = feed.dropped_frames(),
            "Frame loop fell behind, frames were dropped"
        );
    }

    if let Err(e) = session_log.save() {
        tracing::warn!("Could not save session stats: {e}");
    }

    if options.export && !exported.is_empty() {
        export_events(&config.export_path, &exported);
    }

    eprintln!();
    eprintln!("{}", session_log.summary());
}

fn print_event(event: &GestureEvent, t: u64, options: &ReplayOptions, viewport: &Viewport) {
    if options.quiet_moves && matches!(event, GestureEvent::Move { .. }) {
        return;
    }

    match options.output {
        OutputMode::Text => println!("[{t:>8}ms] {event}"),
        OutputMode::Pixels => println!("[{t:>8}ms] {}", viewport.map(event)),
        OutputMode::Json => {
            match serde_json::to_string(&TimedEvent { t, event: *event }) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("Could not serialize event: {e}"),
            }
        }
    }
}

fn export_events(export_dir: &Path, events: &[TimedEvent]) {
    let export_path = export_dir.join(format!(
        "events_{}.jsonl",
        Utc::now().format("%Y%m%d_%H%M%S")
    ));

    if let Err(e) = std::fs::create_dir_all(export_dir) {
        eprintln!("Error creating {export_dir:?}: {e}");
        return;
    }

    let lines = events_to_jsonl(events);

    match std::fs::write(&export_path, lines.join("\n")) {
        Ok(_) => println!("Exported {} events to {:?}", lines.len(), export_path),
        Err(e) => eprintln!("Error writing export: {e}"),
    }
}

/// Serialize events one per line, skipping (and logging) any that fail.
fn events_to_jsonl(events: &[TimedEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match serde_json::to_string(event) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(t = event.t, "Skipping event that failed to serialize: {e}");
                None
            }
        })
        .collect()
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("FingerPoint Status");
    println!("==================");
    println!();
    println!(
        "Gesture control: {}",
        if config.enabled { "enabled" } else { "disabled" }
    );
    println!();

    let stats_path = config.data_path.join("stats.json");
    let persisted = std::fs::read_to_string(&stats_path)
        .ok()
        .and_then(|content| serde_json::from_str::<PersistedStats>(&content).ok());

    match persisted {
        Some(stats) => {
            println!("Cumulative Statistics:");
            println!(
                "  Frames processed: {} ({} with hand, {} without)",
                stats.frames, stats.hand_frames, stats.no_hand_frames
            );
            println!("  Clicks: {}", stats.clicks);
            println!("  Long presses: {}", stats.long_presses);
            println!("  Scroll steps: {}", stats.scrolls);
            println!("  Last updated: {}", stats.last_updated.format("%Y-%m-%d %H:%M:%S"));
        }
        None => println!("No previous session data found."),
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

fn cmd_init(force: bool) {
    let path = Config::config_path();
    if path.exists() && !force {
        eprintln!("Config already exists at {path:?} (use --force to overwrite)");
        std::process::exit(1);
    }

    let config = Config::default();
    if let Err(e) = config.save() {
        eprintln!("Error saving config: {e}");
        std::process::exit(1);
    }
    println!("Wrote default configuration to {path:?}");
}

fn cmd_set_enabled(enabled: bool) {
    let path = Config::config_path();
    if let Err(e) = Config::set_enabled_at(&path, enabled) {
        eprintln!("Error updating config at {path:?}: {e}");
        eprintln!("Fix or re-create the file with 'fingerpoint init --force'.");
        std::process::exit(1);
    }
    if enabled {
        println!("Gesture control enabled.");
    } else {
        println!("Gesture control disabled. Use 'fingerpoint enable' to turn it back on.");
    }
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!("Could not set Ctrl+C handler: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_to_jsonl_one_line_per_event() {
        let events = vec![
            TimedEvent {
                t: 99,
                event: GestureEvent::Click { x: 0.6, y: 0.6 },
            },
            TimedEvent {
                t: 132,
                event: GestureEvent::NoHand,
            },
        ];

        let lines = events_to_jsonl(&events);
        assert_eq!(lines.len(), events.len());

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["t"], 99);
        assert_eq!(first["type"], "click");
        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["type"], "no-hand");
    }
}
