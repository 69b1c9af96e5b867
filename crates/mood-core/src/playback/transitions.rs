//! Mood-transition playlists
//!
//! Builds playlists that drift away from a starting mood along a fixed
//! transition table, and reorders existing playlists so neighbouring tracks
//! move between compatible moods.

use super::catalog::Catalog;
use super::track::Track;
use crate::types::Mood;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

/// Multiplier applied to the starting mood's own weight after each accepted track
pub const PERSISTENCE_DECAY: f32 = 0.9;

/// Default number of tracks in a generated playlist
pub const DEFAULT_PLAYLIST_LENGTH: usize = 10;

/// Transition weight from one mood to another
///
/// Rows need not sum to one; draws renormalise. Neutral has no row of its own
/// and falls back to an even spread, and nothing transitions into Neutral.
pub fn transition_weight(from: Mood, to: Mood) -> f32 {
    use Mood::*;
    match (from, to) {
        (_, Neutral) => 0.0,
        (Neutral, _) => 0.2,

        (Happy, Happy) => 0.6,
        (Happy, Energetic) => 0.2,
        (Happy, Focused) => 0.1,
        (Happy, Relaxed) => 0.03,
        (Happy, Sad) => 0.02,

        (Sad, Sad) => 0.5,
        (Sad, Relaxed) => 0.15,
        (Sad, Focused) => 0.1,
        (Sad, Happy) => 0.03,
        (Sad, Energetic) => 0.02,

        (Energetic, Energetic) => 0.5,
        (Energetic, Happy) => 0.25,
        (Energetic, Focused) => 0.15,
        (Energetic, Relaxed) => 0.03,
        (Energetic, Sad) => 0.02,

        (Focused, Focused) => 0.45,
        (Focused, Energetic) => 0.15,
        (Focused, Happy) => 0.1,
        (Focused, Relaxed) => 0.07,
        (Focused, Sad) => 0.03,

        (Relaxed, Relaxed) => 0.4,
        (Relaxed, Focused) => 0.15,
        (Relaxed, Happy) => 0.1,
        (Relaxed, Sad) => 0.07,
        (Relaxed, Energetic) => 0.03,
    }
}

/// Generate up to `length` distinct tracks starting from `start`
///
/// Each draw picks a mood from the starting mood's row, restricted to moods
/// that still have unused tracks, then a random unused track from that
/// bucket. The starting mood's own weight decays after every accepted track,
/// so long playlists wander further. Generation ends early once no candidate
/// mood carries any weight.
pub fn generate<R: Rng>(
    catalog: &Catalog,
    start: Mood,
    length: usize,
    rng: &mut R,
) -> Vec<Track> {
    let mut playlist = Vec::with_capacity(length);
    let mut used: HashSet<&str> = HashSet::new();
    let mut persistence = 1.0f32;

    while playlist.len() < length {
        let candidates: Vec<(Mood, Vec<&Track>)> = catalog
            .moods()
            .filter_map(|mood| {
                let unused: Vec<&Track> = catalog
                    .bucket(mood)
                    .iter()
                    .filter(|t| !used.contains(t.id.as_str()))
                    .collect();
                (!unused.is_empty()).then_some((mood, unused))
            })
            .collect();

        let weights: Vec<f32> = candidates
            .iter()
            .map(|(mood, _)| {
                let weight = transition_weight(start, *mood);
                if *mood == start {
                    weight * persistence
                } else {
                    weight
                }
            })
            .collect();

        let dist = match WeightedIndex::new(&weights) {
            Ok(dist) => dist,
            Err(_) => {
                log::debug!(
                    "generate: No reachable tracks from {} after {} picks",
                    start,
                    playlist.len()
                );
                break;
            }
        };

        let (_, tracks) = &candidates[dist.sample(rng)];
        let track = tracks[rng.random_range(0..tracks.len())];
        used.insert(track.id.as_str());
        playlist.push(track.clone());
        persistence *= PERSISTENCE_DECAY;
    }

    playlist
}

/// Greedy reorder for smooth transitions
///
/// Keeps the first track, then repeatedly appends the remaining track whose
/// mood has the highest transition weight from the last appended track's
/// mood. Ties go to the earliest remaining track.
pub fn reorder(tracks: Vec<Track>) -> Vec<Track> {
    let mut remaining = tracks.into_iter();
    let Some(first) = remaining.next() else {
        return Vec::new();
    };

    let mut remaining: Vec<Track> = remaining.collect();
    let mut ordered = Vec::with_capacity(remaining.len() + 1);
    ordered.push(first);

    while !remaining.is_empty() {
        let from = ordered[ordered.len() - 1].mood;
        let mut best = 0;
        let mut best_weight = f32::MIN;
        for (i, track) in remaining.iter().enumerate() {
            let weight = transition_weight(from, track.mood);
            if weight > best_weight {
                best = i;
                best_weight = weight;
            }
        }
        ordered.push(remaining.remove(best));
    }

    ordered
}

/// Fraction of tracks per mood
///
/// Every detectable mood is present (possibly at zero). Empty input yields
/// an empty map.
pub fn mood_distribution(tracks: &[Track]) -> BTreeMap<Mood, f32> {
    if tracks.is_empty() {
        return BTreeMap::new();
    }

    let mut counts: BTreeMap<Mood, usize> = Mood::DETECTABLE.iter().map(|m| (*m, 0)).collect();
    for track in tracks {
        *counts.entry(track.mood).or_insert(0) += 1;
    }

    let total = tracks.len() as f32;
    counts
        .into_iter()
        .map(|(mood, count)| (mood, count as f32 / total))
        .collect()
}
