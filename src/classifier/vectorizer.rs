use super::ClassifierError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

lazy_static! {
    // Two or more word characters, the usual bag-of-words token definition.
    static ref TOKEN_PATTERN: Regex =
        Regex::new(r"(?u)\b\w\w+\b").expect("Invalid token pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

/// Sparse feature vector, entries ordered by column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(column, weight)| dense[*column] * weight)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// TF-IDF text vectorizer with a vocabulary fixed at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> TfidfVectorizer {
        TfidfVectorizer {
            vocabulary,
            idf,
            lowercase: true,
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: Norm::L2,
        }
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.vocabulary.is_empty() {
            return Err(ClassifierError::InvalidArtifact(
                "vectorizer vocabulary is empty".to_string(),
            ));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::InvalidArtifact(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }
        if let Some((term, column)) = self
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= self.idf.len())
        {
            return Err(ClassifierError::InvalidArtifact(format!(
                "term \"{}\" maps to column {} but there are only {} idf weights",
                term,
                column,
                self.idf.len()
            )));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::InvalidArtifact(
                "idf weights must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn ngrams(&self, tokens: &[&str]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut out = Vec::new();
        for n in min_n.max(1)..=max_n.min(tokens.len()) {
            out.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        out
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens = self.tokenize(&text);

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.ngrams(&tokens) {
            if let Some(column) = self.vocabulary.get(&term) {
                *counts.entry(*column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (column, tf * self.idf[column])
            })
            .collect();

        let scale = match self.norm {
            Norm::L2 => entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Norm::L1 => entries.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if scale > 0.0 && scale != 1.0 {
            for (_, weight) in entries.iter_mut() {
                *weight /= scale;
            }
        }

        SparseVector { entries }
    }
}
