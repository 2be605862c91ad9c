//! Shared constants for end-to-end tests
//!
//! When the fixture catalog or the fixture classifier change, update only
//! this file.

// ============================================================================
// Test Catalog
// ============================================================================

/// Songs that fit Joy and nothing else.
pub const JOYFUL_SONGS: usize = 25;

/// Songs that fit Sadness and nothing else.
pub const SAD_SONGS: usize = 5;

/// Rows written with a missing value, dropped at load.
pub const INCOMPLETE_ROWS: usize = 2;

/// Songs kept after load: the joyful and sad ones plus one that sits exactly
/// on the Joy valence limit and fits no emotion.
pub const CATALOG_SONGS: usize = JOYFUL_SONGS + SAD_SONGS + 1;

/// Track ID of the song sitting on the Joy valence limit
pub const BOUNDARY_TRACK_ID: &str = "boundary-1";

/// Prefix of every joyful track ID
pub const JOYFUL_TRACK_PREFIX: &str = "joy-";

/// Prefix of every sad track ID
pub const SAD_TRACK_PREFIX: &str = "sad-";

/// Artist shared by all the sad songs
pub const SAD_ARTIST: &str = "The Gloomies";

// ============================================================================
// Test Classifier
// ============================================================================

/// Labels the fixture model was "trained" on, lower-case like a fitted model.
pub const CLASSIFIER_CLASSES: [&str; 3] = ["joy", "sadness", "anger"];

pub const JOYFUL_TEXT: &str = "What a happy day, pure joy!";
pub const SAD_TEXT: &str = "I just want to cry, so sad";
pub const ANGRY_TEXT: &str = "I am ANGRY, really angry";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for a spawned server to answer on /
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout for a single request
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
