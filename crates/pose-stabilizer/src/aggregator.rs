//! Cross-sample aggregation and temporal smoothing.
//!
//! Collapses the sample sets collected in one cycle into a single
//! smoothed probability per vocabulary label. The per-cycle mean is
//! blended against the label's recent committed history, which damps
//! single-frame flicker without hiding a real pose change.

use pose_core::{stats, PredictionSet};

use crate::history::HistoryStore;

/// Committed entries blended into the per-cycle mean
const RECENT_AVERAGE_SPAN: usize = 3;

/// One label's smoothed probability for the current cycle
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedScore {
    pub label: String,
    /// Mean probability across this cycle's sample sets
    pub sample_mean: f64,
    /// Sample mean blended with recent history
    pub blended: f64,
}

/// Collapses raw sample sets into per-label smoothed scores
#[derive(Debug, Clone)]
pub struct Aggregator {
    temporal_smoothing: f64,
    weak_signal_floor: f64,
}

impl Aggregator {
    pub fn new(temporal_smoothing: f64, weak_signal_floor: f64) -> Self {
        Self {
            temporal_smoothing,
            weak_signal_floor,
        }
    }

    /// Drop sets whose strongest probability does not clear the floor.
    /// Those frames carry no usable signal for any label.
    pub fn filter_weak(&self, sets: Vec<PredictionSet>) -> Vec<PredictionSet> {
        sets.into_iter()
            .filter(|set| set.max_probability() > self.weak_signal_floor)
            .collect()
    }

    /// Smooth each label's mean across `sets` against its history.
    ///
    /// Labels come out in the vocabulary order of the first set. A label
    /// with no committed history keeps its plain sample mean: the blend
    /// only applies once there is history to blend against.
    pub fn smooth(&self, sets: &[PredictionSet], history: &HistoryStore) -> Vec<SmoothedScore> {
        let Some(first) = sets.first() else {
            return Vec::new();
        };

        first
            .samples
            .iter()
            .map(|sample| {
                let label = sample.label.as_str();
                let probs: Vec<f64> = sets
                    .iter()
                    .filter_map(|set| set.probability_of(label))
                    .collect();
                let sample_mean = stats::mean(&probs);

                let blended = if history.len_of(label) > 0 {
                    let recent = history.recent_average(label, RECENT_AVERAGE_SPAN);
                    stats::clamp01(
                        sample_mean * (1.0 - self.temporal_smoothing)
                            + recent * self.temporal_smoothing,
                    )
                } else {
                    stats::clamp01(sample_mean)
                };

                SmoothedScore {
                    label: label.to_string(),
                    sample_mean,
                    blended,
                }
            })
            .collect()
    }
}
