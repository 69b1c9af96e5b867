//! Mood Player - headless mood-driven playback runner
//!
//! Replays a recorded landmark session through the detection service and
//! logs the resulting mood and playback events. It:
//! 1. Loads the config (`~/.config/mood-player/config.yaml` by default)
//! 2. Ingests the track manifest, skipping rejected uploads
//! 3. Runs the detection service until the session ends
//!
//! ## Command line flags
//!
//! - `--config PATH`: Config file to load
//! - `--manifest PATH`: YAML list of tracks to ingest
//! - `--session PATH`: Recorded landmark session (required)
//! - `--loop`: Replay the session forever

mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use mood_core::config::{default_config_path, load_config, MoodConfig};
use mood_core::detector::ReplayDetector;
use mood_core::ingest::{load_manifest, prepare_track};
use mood_core::playback::{PlaybackCommand, PlaybackEngine};
use mood_core::services::{AppEvent, DetectionService, EventBus};
use mood_core::MoodError;

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = cli::Args::parse();
    log::info!("mood-player starting up");

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config: MoodConfig = load_config(&config_path);

    let mut engine = PlaybackEngine::from_config(&config.playback);
    if let Some(manifest) = &args.manifest {
        ingest_manifest(&mut engine, manifest, &config)?;
    }

    let detector = ReplayDetector::load(&args.session)?.looping(args.looping);

    let event_bus = EventBus::default();
    let events = event_bus.subscribe();
    let handle = DetectionService::spawn(detector, engine, &config, event_bus.sender())
        .map_err(|e| anyhow!(e))?;

    for event in events.iter() {
        let stopped = matches!(event, AppEvent::ServiceStopped { .. });
        log_event(&event);
        if stopped {
            break;
        }
    }

    handle.join();
    log::info!("mood-player finished");
    Ok(())
}

/// Ingest every acceptable upload from the manifest
fn ingest_manifest(
    engine: &mut PlaybackEngine,
    manifest: &std::path::Path,
    config: &MoodConfig,
) -> Result<()> {
    let uploads = load_manifest(manifest)?;
    let total = uploads.len();
    let mut accepted = 0;

    for upload in uploads {
        match prepare_track(upload, &config.ingest) {
            Ok(track) => {
                engine.ingest(track);
                accepted += 1;
            }
            Err(e) => {
                let err = MoodError::from(e);
                log::warn!("Skipping upload ({}): {}", err.severity(), err);
            }
        }
    }

    log::info!("Ingested {}/{} tracks from {:?}", accepted, total, manifest);
    Ok(())
}

fn log_event(event: &AppEvent) {
    match event {
        AppEvent::MoodDetected(result) => {
            log::info!("Mood: {} ({}%)", result.mood, result.confidence_percent());
        }
        AppEvent::MoodChanged { from, to } => match from {
            Some(from) => log::info!("Mood changed: {} -> {}", from, to),
            None => log::info!("Mood changed: {}", to),
        },
        AppEvent::Playback(PlaybackCommand::Play(track)) => {
            log::info!(
                "Now playing: {} by {} [{}]",
                track.display_name,
                track.artist,
                track.duration_display()
            );
        }
        AppEvent::Playback(PlaybackCommand::Replay(track)) => {
            log::info!("Replaying: {}", track.display_name);
        }
        AppEvent::DetectorFailing {
            consecutive_failures,
        } => {
            log::error!(
                "Face detection failing ({} consecutive failures)",
                consecutive_failures
            );
        }
        other => log::debug!("{:?}", other),
    }
}
