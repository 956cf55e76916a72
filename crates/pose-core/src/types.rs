use serde::{Deserialize, Serialize};

use crate::stats;

/// One (label, probability) pair from a single classifier pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub label: String,
    pub probability: f64,
}

impl Sample {
    /// Build a sample with the probability clamped to [0, 1]
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability: stats::clamp01(probability),
        }
    }
}

/// Output of one classifier pass: one sample per vocabulary label,
/// in the classifier's stable label order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    pub samples: Vec<Sample>,
}

impl PredictionSet {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Strongest probability in the set (0.0 when empty)
    pub fn max_probability(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.probability)
            .fold(0.0, f64::max)
    }

    /// Probability reported for a specific label, if present
    pub fn probability_of(&self, label: &str) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.probability)
    }
}

/// Raw image frame handed to the classifier. The recognition pipeline
/// treats the pixel payload as opaque.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

/// Final label attached to a classification: a real vocabulary label or
/// one of the fixed sentinel outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoseLabel {
    /// Ordinary label from the classifier vocabulary
    Pose(String),
    /// Classifier capability is not ready yet
    NoModel,
    /// No usable samples survived the cycle
    NoDetection,
    /// Winning confidence fell below the configured threshold
    Unknown,
    /// Winning confidence jumped or its recent history is too noisy
    Transitioning,
}

impl PoseLabel {
    /// Human-readable label for display
    pub fn name(&self) -> &str {
        match self {
            PoseLabel::Pose(name) => name,
            PoseLabel::NoModel => "No Model",
            PoseLabel::NoDetection => "No Detection",
            PoseLabel::Unknown => "Unknown",
            PoseLabel::Transitioning => "Transitioning",
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, PoseLabel::Pose(_))
    }
}

/// Why a winning label was downgraded to a sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DowngradeReason {
    /// Enhanced confidence fell below the configured threshold
    LowConfidence,
    /// Confidence jumped or recent variance exceeded the cutoff
    Unstable,
}

/// One stable decision for a recognition cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: PoseLabel,
    /// Final confidence in [0, 1]
    pub confidence: f64,
    /// Confidence before enhancement boosts were applied
    pub original_confidence: f64,
    /// Vocabulary label behind a sentinel outcome, when one exists
    #[serde(default)]
    pub original_label: Option<String>,
    /// Fraction of sample sets in which the label cleared the detection floor
    pub consistency: f64,
    #[serde(default)]
    pub reason: Option<DowngradeReason>,
    /// True when the very-stable polish multiplied the confidence
    #[serde(default)]
    pub stability_boosted: bool,
}

impl Classification {
    /// Cycle ran before any classifier capability was ready
    pub fn no_model() -> Self {
        Self {
            label: PoseLabel::NoModel,
            confidence: 0.0,
            original_confidence: 0.0,
            original_label: None,
            consistency: 0.0,
            reason: None,
            stability_boosted: false,
        }
    }

    /// Cycle produced no usable samples
    pub fn no_detection() -> Self {
        Self {
            label: PoseLabel::NoDetection,
            confidence: 0.0,
            original_confidence: 0.0,
            original_label: None,
            consistency: 0.0,
            reason: None,
            stability_boosted: false,
        }
    }

    pub fn is_detection(&self) -> bool {
        matches!(self.label, PoseLabel::Pose(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_clamps_probability() {
        assert_eq!(Sample::new("Sit", 1.7).probability, 1.0);
        assert_eq!(Sample::new("Sit", -0.3).probability, 0.0);
        assert_eq!(Sample::new("Sit", f64::NAN).probability, 0.0);
        assert_eq!(Sample::new("Sit", 0.42).probability, 0.42);
    }

    #[test]
    fn test_prediction_set_lookup() {
        let set = PredictionSet::new(vec![
            Sample::new("Sit", 0.6),
            Sample::new("Stand", 0.3),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.max_probability(), 0.6);
        assert_eq!(set.probability_of("Stand"), Some(0.3));
        assert_eq!(set.probability_of("Jump"), None);
    }

    #[test]
    fn test_empty_set_max_probability_is_zero() {
        assert_eq!(PredictionSet::default().max_probability(), 0.0);
    }

    #[test]
    fn test_sentinel_names() {
        assert_eq!(PoseLabel::Pose("Tree".into()).name(), "Tree");
        assert_eq!(PoseLabel::NoModel.name(), "No Model");
        assert_eq!(PoseLabel::NoDetection.name(), "No Detection");
        assert_eq!(PoseLabel::Unknown.name(), "Unknown");
        assert_eq!(PoseLabel::Transitioning.name(), "Transitioning");
        assert!(PoseLabel::Transitioning.is_sentinel());
        assert!(!PoseLabel::Pose("Tree".into()).is_sentinel());
    }

    #[test]
    fn test_label_wire_shape() {
        let pose = serde_json::to_string(&PoseLabel::Pose("Sit".into())).unwrap();
        assert_eq!(pose, r#"{"Pose":"Sit"}"#);
        let sentinel = serde_json::to_string(&PoseLabel::NoDetection).unwrap();
        assert_eq!(sentinel, r#""NoDetection""#);
    }

    #[test]
    fn test_sentinel_constructors() {
        let nm = Classification::no_model();
        assert_eq!(nm.label, PoseLabel::NoModel);
        assert_eq!(nm.confidence, 0.0);
        assert!(!nm.is_detection());

        let nd = Classification::no_detection();
        assert_eq!(nd.label, PoseLabel::NoDetection);
        assert!(nd.reason.is_none());
    }
}
