use super::vectorizer::SparseVector;
use super::ClassifierError;
use serde::{Deserialize, Serialize};

/// How per-class scores are turned into probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    /// `Ovr` for a two-class model with a single row, `Multinomial` otherwise.
    #[default]
    Auto,
    /// Softmax over all class scores.
    Multinomial,
    /// One sigmoid per class, normalized to sum to one.
    Ovr,
}

/// Linear label model: one weight row and one intercept per class.
///
/// Two-class models may carry a single row, scoring the second class
/// against the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    #[serde(default)]
    multi_class: MultiClass,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl LinearModel {
    pub fn new(
        classes: Vec<String>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        multi_class: MultiClass,
    ) -> LinearModel {
        LinearModel {
            classes,
            coef,
            intercept,
            multi_class,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    /// Checks the model shape against itself and against the width of the
    /// vectors it is going to be fed.
    pub fn validate(&self, n_features: usize) -> Result<(), ClassifierError> {
        if self.classes.len() < 2 {
            return Err(ClassifierError::InvalidArtifact(format!(
                "model needs at least two classes, found {}",
                self.classes.len()
            )));
        }
        if self.coef.len() != self.classes.len() && !self.is_binary() {
            return Err(ClassifierError::InvalidArtifact(format!(
                "model has {} classes but {} coefficient rows",
                self.classes.len(),
                self.coef.len()
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(ClassifierError::InvalidArtifact(format!(
                "model has {} coefficient rows but {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        if let Some((row, weights)) = self
            .coef
            .iter()
            .enumerate()
            .find(|(_, weights)| weights.len() != n_features)
        {
            return Err(ClassifierError::InvalidArtifact(format!(
                "coefficient row {} has {} weights, the vectorizer produces {} features",
                row,
                weights.len(),
                n_features
            )));
        }
        let all_finite = self
            .coef
            .iter()
            .flatten()
            .chain(self.intercept.iter())
            .all(|w| w.is_finite());
        if !all_finite {
            return Err(ClassifierError::InvalidArtifact(
                "model weights must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn decision_function(&self, features: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(self.intercept.iter())
            .map(|(weights, bias)| features.dot(weights) + bias)
            .collect()
    }

    /// Probability of each class, in the order of [`LinearModel::classes`].
    pub fn predict_proba(&self, features: &SparseVector) -> Vec<f64> {
        let scores = self.decision_function(features);
        if self.is_binary() {
            // softmax([-d, d]) is sigmoid(2d)
            let score = match self.multi_class {
                MultiClass::Multinomial => 2.0 * scores[0],
                MultiClass::Auto | MultiClass::Ovr => scores[0],
            };
            let positive = sigmoid(score);
            return vec![1.0 - positive, positive];
        }
        match self.multi_class {
            MultiClass::Auto | MultiClass::Multinomial => softmax(&scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.into_iter().map(sigmoid).collect();
                let total: f64 = raw.iter().sum();
                if total > 0.0 {
                    raw.into_iter().map(|p| p / total).collect()
                } else {
                    vec![1.0 / self.classes.len() as f64; self.classes.len()]
                }
            }
        }
    }

    /// Most probable class and its probability. Ties go to the class listed
    /// first.
    pub fn predict(&self, features: &SparseVector) -> Result<(&str, f64), ClassifierError> {
        let probabilities = self.predict_proba(features);
        if let Some(bad) = probabilities.iter().find(|p| !p.is_finite()) {
            return Err(ClassifierError::Inference(format!(
                "non-finite class probability {}",
                bad
            )));
        }
        let (best, confidence) = probabilities.iter().enumerate().fold(
            (0, f64::NEG_INFINITY),
            |(best, max), (index, p)| {
                if *p > max {
                    (index, *p)
                } else {
                    (best, max)
                }
            },
        );
        Ok((self.classes[best].as_str(), confidence.clamp(0.0, 1.0)))
    }
}
