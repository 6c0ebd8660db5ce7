/// Sentiment classification model
///
/// The classifier artifact is trained externally and loaded once at process
/// start. This module provides:
/// - The on-disk artifact format and its inference math
/// - The `TextClassifier` trait used as the injection seam for tests
/// - The label mapping from class index to display string
/// - The prediction service wired into the HTTP handlers
pub mod artifact;
pub mod label;
pub mod service;

pub use artifact::{SentimentModel, TextClassifier};
pub use label::{Label, KNOWN_LABELS};
pub use service::{Prediction, PredictionService};
