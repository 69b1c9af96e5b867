//! Track ingestion
//!
//! Turns upload descriptions from the file-ingestion collaborator into
//! catalog-ready [`Track`]s, enforcing the upload size limit and filling
//! metadata defaults.

use crate::config::IngestConfig;
use crate::playback::Track;
use crate::types::Mood;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Artist shown when the upload carries none
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Errors that reject an upload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("{file_name} is {size_bytes} bytes, limit is {max_bytes}")]
    FileTooLarge {
        file_name: String,
        size_bytes: u64,
        max_bytes: u64,
    },

    #[error("Upload has an empty file name")]
    EmptyFileName,
}

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

/// An uploaded file, already mood-tagged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackUpload {
    /// Catalog id; the file name is used when absent
    #[serde(default)]
    pub id: Option<String>,
    pub file_name: String,
    pub source_handle: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    pub mood: Mood,
}

/// Validate an upload and build its track
pub fn prepare_track(upload: TrackUpload, config: &IngestConfig) -> IngestResult<Track> {
    let file_name = upload.file_name.trim();
    if file_name.is_empty() {
        return Err(IngestError::EmptyFileName);
    }

    if upload.size_bytes > config.max_upload_bytes {
        return Err(IngestError::FileTooLarge {
            file_name: file_name.to_string(),
            size_bytes: upload.size_bytes,
            max_bytes: config.max_upload_bytes,
        });
    }

    let artist = upload
        .artist
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    Ok(Track {
        id: upload.id.unwrap_or_else(|| file_name.to_string()),
        display_name: display_name(file_name),
        source_handle: upload.source_handle,
        artist,
        duration_seconds: upload.duration_seconds.unwrap_or(0),
        mood: upload.mood,
    })
}

/// File name with its final extension removed
///
/// Names that are nothing but an extension (`.mp3`) are kept whole.
pub fn display_name(file_name: &str) -> String {
    let is_separator = |c: char| c == '/' || c == '\\';
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains(is_separator) => {
            stem.to_string()
        }
        _ => file_name.to_string(),
    }
}

/// Read a YAML list of uploads
pub fn load_manifest(path: &Path) -> Result<Vec<TrackUpload>> {
    log::info!("load_manifest: Loading from {:?}", path);

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let uploads: Vec<TrackUpload> = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;

    log::info!("load_manifest: {} uploads in {:?}", uploads.len(), path);
    Ok(uploads)
}
