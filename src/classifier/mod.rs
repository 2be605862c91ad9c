mod load;
mod model;
mod text_classifier;
mod vectorizer;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub use load::load_classifier;
pub use model::{LinearModel, MultiClass};
pub use text_classifier::TextEmotionClassifier;
pub use vectorizer::{Norm, SparseVector, TfidfVectorizer};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("No text provided")]
    EmptyText,

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid classifier artifact: {0}")]
    InvalidArtifact(String),

    #[error("{0}")]
    Inference(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub emotion: String,
    pub confidence: f64,
}

/// Anything that can tell which emotion a piece of text conveys.
pub trait EmotionClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Prediction, ClassifierError>;
}
