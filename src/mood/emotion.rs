use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid emotion: {0}")]
pub struct UnknownEmotion(pub String);

/// Upper-cases the first character and lower-cases the rest, so that
/// "sADness" becomes "Sadness".
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Joy => "Joy",
            Emotion::Sadness => "Sadness",
            Emotion::Anger => "Anger",
            Emotion::Fear => "Fear",
            Emotion::Disgust => "Disgust",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(raw: &str) -> Option<Emotion> {
        let canonical = capitalize(raw);
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.name() == canonical)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::parse(s).ok_or_else(|| UnknownEmotion(capitalize(s)))
    }
}
