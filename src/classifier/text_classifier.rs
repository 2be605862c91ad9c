use super::{ClassifierError, EmotionClassifier, LinearModel, Prediction, TfidfVectorizer};
use crate::mood::capitalize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// TF-IDF features fed into a linear model.
#[derive(Debug, Clone)]
pub struct TextEmotionClassifier {
    vectorizer: TfidfVectorizer,
    model: LinearModel,
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ClassifierError> {
    let file = File::open(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ClassifierError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl TextEmotionClassifier {
    pub fn new(
        vectorizer: TfidfVectorizer,
        model: LinearModel,
    ) -> Result<TextEmotionClassifier, ClassifierError> {
        vectorizer.validate()?;
        model.validate(vectorizer.n_features())?;
        Ok(TextEmotionClassifier { vectorizer, model })
    }

    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        vectorizer_path: P,
        model_path: Q,
    ) -> Result<TextEmotionClassifier, ClassifierError> {
        let vectorizer: TfidfVectorizer = read_artifact(vectorizer_path.as_ref())?;
        let model: LinearModel = read_artifact(model_path.as_ref())?;
        TextEmotionClassifier::new(vectorizer, model)
    }

    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }
}

impl EmotionClassifier for TextEmotionClassifier {
    fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        if text.is_empty() {
            return Err(ClassifierError::EmptyText);
        }
        let features = self.vectorizer.transform(text);
        let (label, confidence) = self.model.predict(&features)?;
        Ok(Prediction {
            emotion: capitalize(label),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MultiClass;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn small_vectorizer() -> TfidfVectorizer {
        let vocabulary: HashMap<String, usize> = [("happy", 0), ("sad", 1), ("angry", 2)]
            .into_iter()
            .map(|(t, c)| (t.to_string(), c))
            .collect();
        TfidfVectorizer::new(vocabulary, vec![1.0, 1.0, 1.0])
    }

    fn small_model() -> LinearModel {
        LinearModel::new(
            vec!["joy".into(), "sadness".into(), "anger".into()],
            vec![
                vec![3.0, -1.0, -1.0],
                vec![-1.0, 3.0, -1.0],
                vec![-1.0, -1.0, 3.0],
            ],
            vec![0.0, 0.0, 0.0],
            MultiClass::Multinomial,
        )
    }

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn classifies_and_capitalizes_label() {
        let classifier = TextEmotionClassifier::new(small_vectorizer(), small_model()).unwrap();

        let prediction = classifier.classify("I am so happy today").unwrap();
        assert_eq!(prediction.emotion, "Joy");
        assert!(prediction.confidence > 0.9 && prediction.confidence <= 1.0);

        let prediction = classifier.classify("ANGRY!!").unwrap();
        assert_eq!(prediction.emotion, "Anger");
    }

    #[test]
    fn empty_text_is_rejected() {
        let classifier = TextEmotionClassifier::new(small_vectorizer(), small_model()).unwrap();
        assert!(matches!(
            classifier.classify(""),
            Err(ClassifierError::EmptyText)
        ));
    }

    #[test]
    fn text_without_known_words_still_gets_a_label() {
        let classifier = TextEmotionClassifier::new(small_vectorizer(), small_model()).unwrap();
        let prediction = classifier.classify("   ").unwrap();
        assert_eq!(prediction.emotion, "Joy");
        assert!((prediction.confidence - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_model_narrower_than_vectorizer() {
        let model = LinearModel::new(
            vec!["joy".into(), "sadness".into()],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            vec![0.0, 0.0],
            MultiClass::Multinomial,
        );
        assert!(matches!(
            TextEmotionClassifier::new(small_vectorizer(), model),
            Err(ClassifierError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn loads_from_json_files() {
        let vectorizer = json_file(r#"{"vocabulary": {"calm": 0, "storm": 1}, "idf": [1.0, 1.5]}"#);
        let model = json_file(
            r#"{"classes": ["fear", "joy"], "coef": [[-2.0, 2.0]], "intercept": [0.0]}"#,
        );
        let classifier = TextEmotionClassifier::load(vectorizer.path(), model.path()).unwrap();
        assert_eq!(classifier.classes(), &["fear".to_string(), "joy".to_string()]);
        assert_eq!(classifier.n_features(), 2);

        assert_eq!(classifier.classify("a storm").unwrap().emotion, "Joy");
        assert_eq!(classifier.classify("calm").unwrap().emotion, "Fear");
    }

    #[test]
    fn reports_unreadable_artifacts() {
        let model = json_file("{}");
        assert!(matches!(
            TextEmotionClassifier::load("/nonexistent/vectorizer.json", model.path()),
            Err(ClassifierError::Io { .. })
        ));

        let broken = json_file("not json");
        assert!(matches!(
            TextEmotionClassifier::load(broken.path(), model.path()),
            Err(ClassifierError::Parse { .. })
        ));
    }
}
