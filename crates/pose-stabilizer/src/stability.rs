//! Stability scoring over recent confidence history.

use crate::history::ClassHistory;

/// Entries inspected when scoring stability
pub(crate) const STABILITY_SPAN: usize = 5;

/// Histories shorter than this score zero outright
const MIN_SCORED_LEN: usize = 3;

/// Scores how steady a label's recent confidence stream is
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    max_stable_variance: f64,
}

impl StabilityTracker {
    pub fn new(max_stable_variance: f64) -> Self {
        Self {
            max_stable_variance,
        }
    }

    /// Variance over the label's most recent entries
    pub fn recent_variance(&self, history: &ClassHistory) -> f64 {
        history.recent_variance(STABILITY_SPAN)
    }

    /// Stability in [0, 1]: 1.0 for a flat stream, falling linearly to
    /// 0.0 as recent variance approaches the configured ceiling.
    /// Histories with fewer than 3 entries score 0.0 outright.
    pub fn stability_score(&self, history: &ClassHistory) -> f64 {
        if history.len() < MIN_SCORED_LEN {
            return 0.0;
        }
        let variance = self.recent_variance(history);
        ((self.max_stable_variance - variance) / self.max_stable_variance).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: history of the given values under a wide window
    fn history_of(values: &[f64]) -> ClassHistory {
        let mut history = ClassHistory::default();
        for &value in values {
            history.push(value, 16);
        }
        history
    }

    #[test]
    fn test_short_history_scores_zero() {
        let tracker = StabilityTracker::new(0.1);
        assert_eq!(tracker.stability_score(&history_of(&[])), 0.0);
        assert_eq!(tracker.stability_score(&history_of(&[0.6])), 0.0);
        assert_eq!(tracker.stability_score(&history_of(&[0.6, 0.6])), 0.0);
    }

    #[test]
    fn test_flat_stream_scores_one() {
        let tracker = StabilityTracker::new(0.1);
        let score = tracker.stability_score(&history_of(&[0.6, 0.6, 0.6, 0.6]));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_score_falls_as_variance_grows() {
        let tracker = StabilityTracker::new(0.1);
        let calm = tracker.stability_score(&history_of(&[0.60, 0.61, 0.59]));
        let rough = tracker.stability_score(&history_of(&[0.40, 0.70, 0.30]));
        assert!(calm > rough);
        assert!(calm > 0.9);
    }

    #[test]
    fn test_variance_past_ceiling_floors_at_zero() {
        let tracker = StabilityTracker::new(0.01);
        let score = tracker.stability_score(&history_of(&[0.1, 0.9, 0.1, 0.9]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_variance_uses_recent_entries_only() {
        let tracker = StabilityTracker::new(0.1);
        // Wild start, calm tail: only the recent span should count
        let history = history_of(&[0.1, 0.9, 0.6, 0.6, 0.6, 0.6, 0.6, 0.6, 0.6]);
        assert_eq!(tracker.recent_variance(&history), 0.0);
        assert_eq!(tracker.stability_score(&history), 1.0);
    }
}
