use crate::error::{AppError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Trait for text classifiers.
///
/// The seam between the HTTP layer and the model: handlers only see this
/// trait, so tests can substitute a fixed-output double for the real
/// artifact.
pub trait TextClassifier: Send + Sync {
    /// Predict the class index for one input text
    fn predict(&self, text: &str) -> Result<usize>;

    /// Predict the class-probability distribution for one input text
    fn predict_proba(&self, text: &str) -> Result<Vec<f64>>;

    /// Number of classes in the distribution
    fn n_classes(&self) -> usize;
}

/// Serialized sentiment classifier artifact.
///
/// A TF-IDF vectorizer plus a binary logistic regression, produced by an
/// external training pipeline and loaded once at startup. The struct is the
/// on-disk format: `.bin` files are bincode, `.json` files are serde_json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentModel {
    /// Vocabulary mapping (term -> feature column)
    vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature column
    idf: Array1<f64>,

    /// Logistic regression coefficients, one per feature column
    coefficients: Array1<f64>,

    /// Logistic regression intercept
    intercept: f64,
}

impl SentimentModel {
    /// Load a model artifact from disk, detecting the format from the file
    /// extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                AppError::Serialization(format!("model file has no extension: {}", path.display()))
            })?
            .to_ascii_lowercase();

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let model: SentimentModel = match ext.as_str() {
            "bin" => bincode::deserialize_from(reader).map_err(|e| {
                AppError::Serialization(format!("bincode deserialization failed: {}", e))
            })?,
            "json" => serde_json::from_reader(reader).map_err(|e| {
                AppError::Serialization(format!("JSON deserialization failed: {}", e))
            })?,
            other => {
                return Err(AppError::Serialization(format!(
                    "unsupported model format: .{}",
                    other
                )))
            }
        };

        model.validate()?;
        Ok(model)
    }

    /// Build a model from its raw components, checking internal consistency.
    pub fn from_parts(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self> {
        let model = Self {
            vocabulary,
            idf: Array1::from_vec(idf),
            coefficients: Array1::from_vec(coefficients),
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let n = self.idf.len();
        if self.coefficients.len() != n {
            return Err(AppError::Serialization(format!(
                "artifact is inconsistent: {} idf weights but {} coefficients",
                n,
                self.coefficients.len()
            )));
        }
        if let Some((term, &column)) = self.vocabulary.iter().find(|(_, &col)| col >= n) {
            return Err(AppError::Serialization(format!(
                "artifact is inconsistent: term {:?} maps to column {} of {}",
                term, column, n
            )));
        }
        Ok(())
    }

    /// TF-IDF vector for one text: term counts weighted by IDF, then
    /// L2-normalized. Out-of-vocabulary terms are ignored.
    fn vectorize(&self, text: &str) -> Array1<f64> {
        let mut features = Array1::<f64>::zeros(self.idf.len());

        for token in text.split_whitespace() {
            let token = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            if let Some(&column) = self.vocabulary.get(&token) {
                features[column] += 1.0;
            }
        }

        for (column, value) in features.iter_mut().enumerate() {
            *value *= self.idf[column];
        }

        let norm = features.dot(&features).sqrt();
        if norm > 0.0 {
            features /= norm;
        }
        features
    }

    fn positive_probability(&self, text: &str) -> f64 {
        let features = self.vectorize(text);
        let score = self.coefficients.dot(&features) + self.intercept;
        sigmoid(score)
    }
}

impl TextClassifier for SentimentModel {
    fn predict(&self, text: &str) -> Result<usize> {
        let p = self.positive_probability(text);
        Ok(usize::from(p >= 0.5))
    }

    fn predict_proba(&self, text: &str) -> Result<Vec<f64>> {
        let p = self.positive_probability(text);
        Ok(vec![1.0 - p, p])
    }

    fn n_classes(&self) -> usize {
        2
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
