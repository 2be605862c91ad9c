//! Test fixture creation for the song catalog and the classifier artifacts

use super::constants::*;
use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CATALOG_HEADER: &str = ",track_id,artists,album_name,track_name,popularity,duration_ms,explicit,danceability,energy,key,loudness,mode,speechiness,acousticness,instrumentalness,liveness,valence,tempo,time_signature,track_genre";

struct Row<'a> {
    track_id: String,
    artists: &'a str,
    track_name: String,
    valence: &'a str,
    energy: f64,
    loudness: f64,
    danceability: f64,
}

impl Row<'_> {
    fn to_csv(&self, index: usize) -> String {
        format!(
            "{},{},{},Fixture Album,{},42,180000,False,{},{},5,{},1,0.04,0.3,0.0,0.12,{},118.0,4,pop",
            index,
            self.track_id,
            self.artists,
            self.track_name,
            self.danceability,
            self.energy,
            self.loudness,
            self.valence
        )
    }
}

/// Writes the fixture catalog:
/// - [`JOYFUL_SONGS`] songs fitting Joy only,
/// - [`SAD_SONGS`] songs fitting Sadness only,
/// - one song on the Joy valence limit, fitting nothing,
/// - [`INCOMPLETE_ROWS`] rows with an empty valence, dropped at load.
///
/// Nothing fits Anger, Fear or Disgust.
/// Returns (temp_dir, catalog_path)
pub fn write_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let mut rows = Vec::new();

    for i in 0..JOYFUL_SONGS {
        rows.push(Row {
            track_id: format!("{}{}", JOYFUL_TRACK_PREFIX, i),
            artists: "Sunny Side",
            track_name: format!("Sunshine {}", i),
            valence: "0.9",
            energy: 0.8,
            loudness: -10.0,
            danceability: 0.7,
        });
    }
    for i in 0..SAD_SONGS {
        rows.push(Row {
            track_id: format!("{}{}", SAD_TRACK_PREFIX, i),
            artists: SAD_ARTIST,
            track_name: format!("Rain {}", i),
            valence: "0.2",
            energy: 0.3,
            loudness: -15.0,
            danceability: 0.7,
        });
    }
    rows.push(Row {
        track_id: BOUNDARY_TRACK_ID.to_string(),
        artists: "Edge Case",
        track_name: "Almost Happy".to_string(),
        valence: "0.6",
        energy: 0.9,
        loudness: -10.0,
        danceability: 0.7,
    });
    for i in 0..INCOMPLETE_ROWS {
        rows.push(Row {
            track_id: format!("incomplete-{}", i),
            artists: "Nobody",
            track_name: "Unknown".to_string(),
            valence: "",
            energy: 0.8,
            loudness: -10.0,
            danceability: 0.7,
        });
    }

    let mut content = String::from(CATALOG_HEADER);
    content.push('\n');
    for (index, row) in rows.iter().enumerate() {
        content.push_str(&row.to_csv(index));
        content.push('\n');
    }

    let catalog_path = dir.path().join("unique_songs.csv");
    fs::write(&catalog_path, content)?;
    Ok((dir, catalog_path))
}

/// Writes a tiny vectorizer and a three-class model whose predictions
/// follow the keywords in [`JOYFUL_TEXT`], [`SAD_TEXT`] and [`ANGRY_TEXT`].
/// Returns (temp_dir, vectorizer_path, model_path)
pub fn write_test_artifacts() -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = TempDir::new()?;

    let vectorizer = json!({
        "vocabulary": { "happy": 0, "joy": 1, "sad": 2, "cry": 3, "angry": 4 },
        "idf": [1.2, 1.5, 1.2, 1.6, 1.4],
        "lowercase": true,
        "ngram_range": [1, 1],
        "sublinear_tf": false,
        "norm": "l2"
    });
    let model = json!({
        "classes": CLASSIFIER_CLASSES,
        "coef": [
            [4.0, 4.0, -2.0, -2.0, -2.0],
            [-2.0, -2.0, 4.0, 4.0, -2.0],
            [-2.0, -2.0, -2.0, -2.0, 4.0]
        ],
        "intercept": [0.1, 0.0, -0.1],
        "multi_class": "multinomial"
    });

    let vectorizer_path = dir.path().join("tfidf_vectorizer.json");
    let model_path = dir.path().join("emotion_model.json");
    fs::write(&vectorizer_path, serde_json::to_string_pretty(&vectorizer)?)?;
    fs::write(&model_path, serde_json::to_string_pretty(&model)?)?;
    Ok((dir, vectorizer_path, model_path))
}
