use serde::{Serialize, Serializer};
use std::fmt;

/// Sentiment label for a review.
///
/// The mapping from classifier class index to display string is total:
/// indices outside the trained set map to [`Label::Unknown`], which renders
/// as the raw index so the wire format never changes shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Class 0
    Negative,
    /// Class 1
    Positive,
    /// A class index the mapping does not know about
    Unknown(usize),
}

/// Display names for the known labels, indexed by class
pub const KNOWN_LABELS: [&str; 2] = ["Tiêu cực", "Tích cực"];

impl Label {
    /// Map a classifier class index to its label. Total: never fails.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Label::Negative,
            1 => Label::Positive,
            other => Label::Unknown(other),
        }
    }

    /// True for labels the classifier was trained on
    pub fn is_known(&self) -> bool {
        !matches!(self, Label::Unknown(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Negative => f.write_str(KNOWN_LABELS[0]),
            Label::Positive => f.write_str(KNOWN_LABELS[1]),
            Label::Unknown(index) => write!(f, "{}", index),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_indices() {
        assert_eq!(Label::from_index(0), Label::Negative);
        assert_eq!(Label::from_index(1), Label::Positive);
        assert_eq!(Label::from_index(0).to_string(), "Tiêu cực");
        assert_eq!(Label::from_index(1).to_string(), "Tích cực");
    }

    #[test]
    fn test_unknown_index_renders_raw() {
        let label = Label::from_index(7);
        assert_eq!(label, Label::Unknown(7));
        assert!(!label.is_known());
        assert_eq!(label.to_string(), "7");
    }

    #[test]
    fn test_serializes_as_display_string() {
        assert_eq!(
            serde_json::to_string(&Label::Positive).unwrap(),
            "\"Tích cực\""
        );
        assert_eq!(serde_json::to_string(&Label::Unknown(3)).unwrap(), "\"3\"");
    }
}
