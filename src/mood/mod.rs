//! Rule-based mapping from emotions to songs.

mod emotion;
mod mapper;
pub mod rules;

pub use emotion::{capitalize, Emotion, UnknownEmotion};
pub use mapper::{candidates, select, select_by_name, select_with_rng, MAX_SONGS_PER_MOOD};
pub use rules::{rules_for, AudioFeature, Comparison, Threshold};
