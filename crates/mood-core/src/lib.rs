//! Mood Core - mood inference and mood-driven playback for Mood Player

pub mod types;
pub mod error;
pub mod geometry;
pub mod features;
pub mod classifier;
pub mod history;
pub mod playback;
pub mod ingest;
pub mod detector;
pub mod services;
pub mod config;

pub use types::*;
pub use error::{MoodError, Severity};
