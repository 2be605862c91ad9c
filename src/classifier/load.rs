use super::TextEmotionClassifier;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn load_classifier<P: AsRef<Path>, Q: AsRef<Path>>(
    vectorizer_path: P,
    model_path: Q,
) -> Result<TextEmotionClassifier> {
    let vectorizer_path = vectorizer_path.as_ref();
    let model_path = model_path.as_ref();
    info!(
        "Loading emotion classifier from {} and {}...",
        vectorizer_path.display(),
        model_path.display()
    );

    let classifier = TextEmotionClassifier::load(vectorizer_path, model_path).with_context(|| {
        format!(
            "Could not load emotion classifier from {} and {}",
            vectorizer_path.display(),
            model_path.display()
        )
    })?;

    info!(
        "Emotion classifier ready: {} features, classes [{}].",
        classifier.n_features(),
        classifier.classes().join(", ")
    );
    Ok(classifier)
}
