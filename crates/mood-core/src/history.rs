//! Mood history log
//!
//! Fixed-capacity record of past classifications, newest first. When a record
//! pushes the log past its capacity the oldest entry is evicted.

use crate::types::{Mood, MoodResult, DEFAULT_HISTORY_CAPACITY};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One recorded classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodHistoryEntry {
    pub mood: Mood,
    pub confidence: f32,
    pub timestamp: DateTime<Local>,
    /// Tracks started while this was the newest entry
    pub songs_played: u32,
}

impl MoodHistoryEntry {
    pub fn result(&self) -> MoodResult {
        MoodResult::new(self.mood, self.confidence)
    }
}

/// Newest-first log of mood classifications
#[derive(Debug, Clone)]
pub struct MoodHistory {
    entries: VecDeque<MoodHistoryEntry>,
    capacity: usize,
}

impl Default for MoodHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl MoodHistory {
    /// Create a log holding at most `capacity` entries
    ///
    /// The capacity is clamped to `1..=DEFAULT_HISTORY_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, DEFAULT_HISTORY_CAPACITY);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a classification stamped with the current local time
    pub fn record(&mut self, result: MoodResult) {
        self.record_at(result, Local::now());
    }

    /// Record a classification with an explicit timestamp
    pub fn record_at(&mut self, result: MoodResult, timestamp: DateTime<Local>) {
        self.entries.push_front(MoodHistoryEntry {
            mood: result.mood,
            confidence: result.confidence,
            timestamp,
            songs_played: 0,
        });

        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Count a started track against the newest entry
    pub fn note_track_played(&mut self) {
        if let Some(entry) = self.entries.front_mut() {
            entry.songs_played += 1;
        }
    }

    /// Copy of the log, newest first
    pub fn snapshot(&self) -> Vec<MoodHistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&MoodHistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
