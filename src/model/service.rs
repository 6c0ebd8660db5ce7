use crate::config::ModelConfig;
use crate::error::{AppError, Result};
use crate::model::artifact::{SentimentModel, TextClassifier};
use crate::model::label::Label;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Outcome of a single prediction
#[derive(Debug, Clone)]
pub struct Prediction {
    pub label: Label,
    /// Maximum value in the predicted class-probability distribution
    pub confidence: f64,
    /// Wall-clock seconds spent on this prediction
    pub processing_time: f64,
}

/// Prediction service holding the loaded classifier.
///
/// Constructed once at process start and handed to request handlers through
/// the router state. A failed artifact load does not kill the process: the
/// service is constructed in a degraded state where `/health` reports the
/// failure and every prediction fails fast.
pub struct PredictionService {
    classifier: Option<Arc<dyn TextClassifier>>,
    load_error: Option<String>,
    max_review_length: usize,
}

impl PredictionService {
    /// Load the classifier artifact named by the configuration. Never fails;
    /// a load error is recorded and surfaced through `/health`.
    pub fn load(config: &ModelConfig) -> Self {
        info!(path = %config.path.display(), "Loading classifier artifact");

        match SentimentModel::load(&config.path) {
            Ok(model) => {
                info!("Classifier artifact loaded");
                Self::with_classifier(Arc::new(model), config.max_review_length)
            }
            Err(e) => {
                error!(path = %config.path.display(), error = %e, "Failed to load classifier artifact");
                warn!("Service will start degraded: health reports the failure, predictions fail fast");
                Self::unavailable(e.to_string(), config.max_review_length)
            }
        }
    }

    /// Build a service around an already-constructed classifier. This is the
    /// injection point for test doubles.
    pub fn with_classifier(classifier: Arc<dyn TextClassifier>, max_review_length: usize) -> Self {
        Self {
            classifier: Some(classifier),
            load_error: None,
            max_review_length,
        }
    }

    /// Build a degraded service with no classifier
    pub fn unavailable(reason: impl Into<String>, max_review_length: usize) -> Self {
        Self {
            classifier: None,
            load_error: Some(reason.into()),
            max_review_length,
        }
    }

    /// Whether the classifier loaded successfully
    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }

    /// The recorded load failure, if any
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Classify one review.
    ///
    /// Input longer than the configured bound is truncated to exactly the
    /// bound (in characters) before inference; the remainder is discarded.
    pub fn predict(&self, review: &str) -> Result<Prediction> {
        let start = Instant::now();

        let classifier = self.classifier.as_ref().ok_or_else(|| {
            AppError::ModelUnavailable(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| "classifier not loaded".to_string()),
            )
        })?;

        let input = self.truncate(review);

        let class = classifier.predict(input)?;
        let proba = classifier.predict_proba(input)?;

        if proba.len() != classifier.n_classes() {
            return Err(AppError::Inference(format!(
                "classifier returned {} probabilities for {} classes",
                proba.len(),
                classifier.n_classes()
            )));
        }

        let confidence = proba
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if !confidence.is_finite() {
            return Err(AppError::Inference(
                "classifier returned an empty or non-finite distribution".to_string(),
            ));
        }

        Ok(Prediction {
            label: Label::from_index(class),
            confidence,
            processing_time: start.elapsed().as_secs_f64(),
        })
    }

    /// Cut the review at the character bound without splitting a UTF-8
    /// sequence.
    fn truncate<'a>(&self, review: &'a str) -> &'a str {
        match review.char_indices().nth(self.max_review_length) {
            Some((byte_index, _)) => &review[..byte_index],
            None => review,
        }
    }
}
