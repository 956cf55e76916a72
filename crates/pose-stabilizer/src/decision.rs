//! Winner selection for a recognition cycle.
//!
//! Candidates are ranked by their enhanced confidence weighted by
//! detection consistency: a label seen in every sample set outranks one
//! that spiked in a single frame. Sentinel outcomes are resolved only
//! for the winner; the runner-up labels never surface.

use std::collections::HashMap;

use pose_core::{Classification, DowngradeReason, PoseLabel, PredictionSet};

use crate::enhancer::{CandidateOutcome, EnhancedCandidate};

/// Fixed split between raw confidence and detection consistency
const BASE_WEIGHT: f64 = 0.7;
const CONSISTENCY_WEIGHT: f64 = 0.3;

/// Ranks enhanced candidates and produces the cycle's classification
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    min_detection_floor: f64,
}

impl DecisionPolicy {
    pub fn new(min_detection_floor: f64) -> Self {
        Self {
            min_detection_floor,
        }
    }

    /// Count, per label, the sample sets where its probability cleared
    /// the detection floor.
    pub fn detection_counts(&self, sets: &[PredictionSet]) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for set in sets {
            for sample in &set.samples {
                if sample.probability > self.min_detection_floor {
                    *counts.entry(sample.label.clone()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Pick the winning candidate and map it to a classification.
    ///
    /// Ties resolve to the candidate appearing first, which follows the
    /// classifier's vocabulary order. Labels that never cleared the
    /// detection floor are out of the running entirely.
    pub fn decide(
        &self,
        candidates: &[EnhancedCandidate],
        sets: &[PredictionSet],
    ) -> Classification {
        let total_sets = sets.len();
        if total_sets == 0 || candidates.is_empty() {
            return Classification::no_detection();
        }

        let counts = self.detection_counts(sets);

        let mut best: Option<(&EnhancedCandidate, f64, f64)> = None;
        for candidate in candidates {
            let detections = counts.get(&candidate.label).copied().unwrap_or(0);
            if detections == 0 {
                continue;
            }
            let consistency = detections as f64 / total_sets as f64;
            let weighted = candidate.enhanced * (BASE_WEIGHT + CONSISTENCY_WEIGHT * consistency);
            match best {
                Some((_, best_weighted, _)) if weighted <= best_weighted => {}
                _ => best = Some((candidate, weighted, consistency)),
            }
        }

        let Some((winner, _, consistency)) = best else {
            return Classification::no_detection();
        };

        match winner.outcome {
            CandidateOutcome::Steady => Classification {
                label: PoseLabel::Pose(winner.label.clone()),
                confidence: winner.confidence,
                original_confidence: winner.base,
                original_label: None,
                consistency,
                reason: None,
                stability_boosted: winner.stability_boosted,
            },
            CandidateOutcome::LowConfidence => Classification {
                label: PoseLabel::Unknown,
                confidence: winner.confidence,
                original_confidence: winner.base,
                original_label: Some(winner.label.clone()),
                consistency,
                reason: Some(DowngradeReason::LowConfidence),
                stability_boosted: false,
            },
            CandidateOutcome::Transitioning => Classification {
                label: PoseLabel::Transitioning,
                confidence: winner.confidence,
                original_confidence: winner.base,
                original_label: Some(winner.label.clone()),
                consistency,
                reason: Some(DowngradeReason::Unstable),
                stability_boosted: false,
            },
        }
    }
}
