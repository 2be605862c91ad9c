use super::Emotion;
use crate::catalog::Song;
use std::fmt;

/// Audio features the mood rules look at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioFeature {
    Valence,
    Energy,
    Loudness,
    Danceability,
}

impl AudioFeature {
    pub fn name(&self) -> &'static str {
        match self {
            AudioFeature::Valence => "valence",
            AudioFeature::Energy => "energy",
            AudioFeature::Loudness => "loudness",
            AudioFeature::Danceability => "danceability",
        }
    }

    pub fn value(&self, song: &Song) -> f64 {
        match self {
            AudioFeature::Valence => song.valence,
            AudioFeature::Energy => song.energy,
            AudioFeature::Loudness => song.loudness,
            AudioFeature::Danceability => song.danceability,
        }
    }
}

/// Both comparisons are strict: a value equal to the limit never matches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparison {
    Above,
    Below,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Threshold {
    pub feature: AudioFeature,
    pub comparison: Comparison,
    pub limit: f64,
}

impl Threshold {
    const fn above(feature: AudioFeature, limit: f64) -> Threshold {
        Threshold {
            feature,
            comparison: Comparison::Above,
            limit,
        }
    }

    const fn below(feature: AudioFeature, limit: f64) -> Threshold {
        Threshold {
            feature,
            comparison: Comparison::Below,
            limit,
        }
    }

    pub fn matches(&self, song: &Song) -> bool {
        let value = self.feature.value(song);
        match self.comparison {
            Comparison::Above => value > self.limit,
            Comparison::Below => value < self.limit,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.comparison {
            Comparison::Above => ">",
            Comparison::Below => "<",
        };
        write!(f, "{} {} {}", self.feature.name(), op, self.limit)
    }
}

const JOY: [Threshold; 2] = [
    Threshold::above(AudioFeature::Valence, 0.6),
    Threshold::above(AudioFeature::Energy, 0.5),
];

const SADNESS: [Threshold; 2] = [
    Threshold::below(AudioFeature::Valence, 0.4),
    Threshold::below(AudioFeature::Energy, 0.5),
];

const ANGER: [Threshold; 2] = [
    Threshold::above(AudioFeature::Energy, 0.7),
    Threshold::above(AudioFeature::Loudness, -7.0),
];

const FEAR: [Threshold; 2] = [
    Threshold::below(AudioFeature::Valence, 0.5),
    Threshold::above(AudioFeature::Energy, 0.6),
];

const DISGUST: [Threshold; 2] = [
    Threshold::below(AudioFeature::Valence, 0.6),
    Threshold::below(AudioFeature::Danceability, 0.5),
];

/// The thresholds a song has to satisfy, all of them, to fit an emotion.
pub fn rules_for(emotion: Emotion) -> &'static [Threshold; 2] {
    match emotion {
        Emotion::Joy => &JOY,
        Emotion::Sadness => &SADNESS,
        Emotion::Anger => &ANGER,
        Emotion::Fear => &FEAR,
        Emotion::Disgust => &DISGUST,
    }
}

pub fn matches(emotion: Emotion, song: &Song) -> bool {
    rules_for(emotion).iter().all(|t| t.matches(song))
}
