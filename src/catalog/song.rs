use serde::{de, Deserialize, Deserializer, Serialize};

/// Columns every catalog file must provide. Anything else in the header is
/// carried along (or ignored) but never required.
pub const REQUIRED_COLUMNS: [&str; 15] = [
    "track_id",
    "artists",
    "track_name",
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
    "time_signature",
];

/// A single row of the song catalog.
///
/// The audio features follow the usual streaming-service conventions: most
/// of them are in `[0, 1]`, `loudness` is in dB (typically `-60..0`),
/// `tempo` is in BPM, `key` is a pitch class and `mode` is 0 (minor) or 1
/// (major).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Song {
    pub track_id: String,
    pub artists: String,
    pub track_name: String,

    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub track_genre: Option<String>,

    pub danceability: f64,
    pub energy: f64,
    pub key: i32,
    pub loudness: f64,
    pub mode: i32,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub time_signature: i32,
}

// Exported datasets spell booleans in a handful of ways ("True", "false", "1").
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(de::Error::custom(format!(
                "invalid boolean value \"{}\"",
                other
            ))),
        },
    }
}
