use super::{rules, Emotion};
use crate::catalog::{Catalog, Song};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Maximum number of songs handed back for a single mood.
pub const MAX_SONGS_PER_MOOD: usize = 20;

/// Every song of the catalog that fits `emotion`, in catalog order.
pub fn candidates(catalog: &Catalog, emotion: Emotion) -> Vec<&Song> {
    let found: Vec<&Song> = catalog
        .iter_songs()
        .filter(|song| rules::matches(emotion, song))
        .collect();
    debug!("Found {} songs for the emotion: {}", found.len(), emotion);
    found
}

/// Picks at most [`MAX_SONGS_PER_MOOD`] distinct songs among the candidates
/// for `emotion`. When there are no more candidates than that, all of them
/// are returned as they are.
pub fn select_with_rng<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    emotion: Emotion,
    rng: &mut R,
) -> Vec<&'a Song> {
    let found = candidates(catalog, emotion);
    if found.len() <= MAX_SONGS_PER_MOOD {
        return found;
    }
    found
        .choose_multiple(rng, MAX_SONGS_PER_MOOD)
        .copied()
        .collect()
}

pub fn select(catalog: &Catalog, emotion: Emotion) -> Vec<&Song> {
    select_with_rng(catalog, emotion, &mut rand::rng())
}

/// Like [`select`], starting from a user-provided emotion name. An unknown
/// name yields no songs.
pub fn select_by_name<'a>(catalog: &'a Catalog, raw_emotion: &str) -> Vec<&'a Song> {
    match Emotion::parse(raw_emotion) {
        Some(emotion) => select(catalog, emotion),
        None => {
            warn!("Invalid emotion '{}'.", raw_emotion);
            Vec::new()
        }
    }
}
