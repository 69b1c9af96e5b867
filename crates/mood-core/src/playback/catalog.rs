//! Mood-tagged track catalog
//!
//! Buckets keep the order in which their mood was first ingested, and tracks
//! keep insertion order within a bucket. A track id lives in exactly one
//! bucket.

use super::track::Track;
use crate::types::Mood;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buckets: Vec<(Mood, Vec<Track>)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track to its mood's bucket, creating the bucket if needed
    ///
    /// A track with an id already in the catalog replaces the old entry, which
    /// is removed from whichever bucket held it. Returns the replaced track.
    pub fn insert(&mut self, track: Track) -> Option<Track> {
        let replaced = self.remove(&track.id);

        match self.buckets.iter_mut().find(|(mood, _)| *mood == track.mood) {
            Some((_, tracks)) => tracks.push(track),
            None => self.buckets.push((track.mood, vec![track])),
        }

        replaced
    }

    /// Remove a track by id
    ///
    /// Emptied buckets stay in place so bucket order is stable.
    pub fn remove(&mut self, id: &str) -> Option<Track> {
        for (_, tracks) in &mut self.buckets {
            if let Some(pos) = tracks.iter().position(|t| t.id == id) {
                return Some(tracks.remove(pos));
            }
        }
        None
    }

    /// Tracks tagged with `mood`, in insertion order
    pub fn bucket(&self, mood: Mood) -> &[Track] {
        self.buckets
            .iter()
            .find(|(m, _)| *m == mood)
            .map(|(_, tracks)| tracks.as_slice())
            .unwrap_or(&[])
    }

    /// Every track, bucket by bucket in bucket insertion order
    pub fn all_tracks(&self) -> Vec<&Track> {
        self.buckets
            .iter()
            .flat_map(|(_, tracks)| tracks.iter())
            .collect()
    }

    /// Moods with a bucket, in bucket insertion order
    pub fn moods(&self) -> impl Iterator<Item = Mood> + '_ {
        self.buckets.iter().map(|(mood, _)| *mood)
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.buckets
            .iter()
            .flat_map(|(_, tracks)| tracks.iter())
            .find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, tracks)| tracks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
