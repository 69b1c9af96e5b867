//! Background services for mood-core
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     Commands      ┌──────────────────┐     detect()    ┌──────────┐
//! │  UI / main  │ ───────────────►  │ DetectionService │ ──────────────► │ Detector │
//! │             │ ◄─────────────── │ history, engine  │                 └──────────┘
//! └─────────────┘     Replies       └──────────────────┘
//!       │                                   │
//!       │ Subscribe                         │ Publish
//!       ▼                                   ▼
//! ┌─────────────────────────────────────────────┐
//! │               Event Bus                      │
//! │  (crossbeam channel - mood, playback,       │
//! │   detector health, lifecycle)               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use mood_core::config::MoodConfig;
//! use mood_core::detector::{ReplayDetector, ReplayFrame};
//! use mood_core::playback::PlaybackEngine;
//! use mood_core::services::{DetectionClient, DetectionService, EventBus};
//!
//! let event_bus = EventBus::default();
//! let detector = ReplayDetector::new(vec![ReplayFrame::no_face()]).looping(true);
//!
//! let handle = DetectionService::spawn(
//!     detector,
//!     PlaybackEngine::new(),
//!     &MoodConfig::default(),
//!     event_bus.sender(),
//! )
//! .unwrap();
//!
//! let client = DetectionClient::new(&handle);
//! println!("History: {:?}", client.history().unwrap());
//! client.stop().unwrap();
//! handle.join();
//! ```

pub mod detection;
pub mod messages;

pub use messages::{
    // Commands
    DetectionCommand,
    // Events
    AppEvent, SkipReason,
    // Infrastructure
    EventBus, ServiceHandle, StopSignal,
};

pub use detection::{DetectionClient, DetectionService};
