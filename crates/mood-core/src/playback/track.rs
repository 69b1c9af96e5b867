//! Track metadata

use crate::types::Mood;
use serde::{Deserialize, Serialize};

/// A playable track tagged with a mood
///
/// Immutable once ingested; re-tagging means ingesting a replacement with the
/// same `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier within the catalog
    pub id: String,
    /// Name shown to the user
    pub display_name: String,
    /// Opaque handle the audio collaborator uses to open the media
    pub source_handle: String,
    pub artist: String,
    pub duration_seconds: u32,
    pub mood: Mood,
}

impl Track {
    /// Duration formatted as `m:ss`
    pub fn duration_display(&self) -> String {
        format_duration(self.duration_seconds)
    }
}

/// Format seconds as `m:ss`
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
