//! Confidence enhancement and per-label outcome resolution.
//!
//! Takes each label's smoothed probability and rewards evidence the
//! pipeline trusts: a steady recent history earns a stability boost, and
//! an already-confident reading is amplified further. The boosted value
//! is then sanity-checked against the label's history; a sudden jump or
//! a noisy stretch downgrades the outcome instead of reporting a
//! confidence the next cycle would contradict.

use pose_core::stats;

use crate::aggregator::SmoothedScore;
use crate::config::RecognitionConfig;
use crate::history::ClassHistory;
use crate::stability::StabilityTracker;

/// Scale applied to the stability score before it becomes a boost
const STABILITY_BOOST_SCALE: f64 = 0.2;

/// Entries inspected by the jump check
const JUMP_SPAN: usize = 4;

/// Damping applied to the reported confidence during a transition
const TRANSITION_DAMPING: f64 = 0.8;

/// Reported transition confidence never falls below this
const TRANSITION_FLOOR: f64 = 0.15;

/// History length required before the very-stable polish applies
const POLISH_MIN_LEN: usize = 5;

/// Recent variance must stay under this for the polish
const POLISH_MAX_VARIANCE: f64 = 0.05;

/// Confidence must exceed this for the polish
const POLISH_MIN_CONFIDENCE: f64 = 0.4;

/// Multiplier and cap for the very-stable polish
const POLISH_MULTIPLIER: f64 = 1.15;
const POLISH_CAP: f64 = 0.95;

/// How a label's enhanced confidence should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Ordinary labeled result
    Steady,
    /// Enhanced confidence fell below the configured threshold
    LowConfidence,
    /// Confidence jumped or recent history is too noisy
    Transitioning,
}

/// One label's enhanced confidence plus its resolved outcome
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancedCandidate {
    pub label: String,
    /// Smoothed probability the enhancement started from
    pub base: f64,
    pub stability_boost: f64,
    pub high_confidence_boost: f64,
    /// Boosted confidence used when ranking candidates
    pub enhanced: f64,
    /// Confidence to report if this candidate wins the cycle
    pub confidence: f64,
    pub outcome: CandidateOutcome,
    /// True when the very-stable polish multiplied the confidence
    pub stability_boosted: bool,
}

/// Applies confidence boosts and resolves each label's outcome
#[derive(Debug, Clone)]
pub struct ConfidenceEnhancer {
    confidence_threshold: f64,
    stability_weight: f64,
    amplification_factor: f64,
    high_confidence_threshold: f64,
    jump_threshold: f64,
    variance_cutoff: f64,
}

impl ConfidenceEnhancer {
    pub fn new(config: &RecognitionConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            stability_weight: config.stability_weight,
            amplification_factor: config.amplification_factor,
            high_confidence_threshold: config.high_confidence_threshold,
            jump_threshold: config.jump_threshold,
            variance_cutoff: config.variance_cutoff,
        }
    }

    /// Boost one label's smoothed score and resolve its outcome against
    /// its committed history.
    pub fn enhance(
        &self,
        score: &SmoothedScore,
        history: Option<&ClassHistory>,
        tracker: &StabilityTracker,
    ) -> EnhancedCandidate {
        let base = score.blended;

        let stability_boost = history.map_or(0.0, |h| {
            tracker.stability_score(h) * self.stability_weight * STABILITY_BOOST_SCALE
        });

        let high_confidence_boost = if base > self.high_confidence_threshold {
            self.amplification_factor * (base - self.high_confidence_threshold)
        } else {
            0.0
        };

        let enhanced = stats::clamp01(base + stability_boost + high_confidence_boost);

        let (outcome, confidence, stability_boosted) = self.resolve(enhanced, history);

        EnhancedCandidate {
            label: score.label.clone(),
            base,
            stability_boost,
            high_confidence_boost,
            enhanced,
            confidence,
            outcome,
            stability_boosted,
        }
    }

    /// Outcome for the boosted value. The low-confidence check runs
    /// first: a weak reading is Unknown even when it also jumped.
    fn resolve(
        &self,
        enhanced: f64,
        history: Option<&ClassHistory>,
    ) -> (CandidateOutcome, f64, bool) {
        if enhanced < self.confidence_threshold {
            return (CandidateOutcome::LowConfidence, enhanced, false);
        }

        if let Some(history) = history {
            if history.len() >= 2 {
                let recent_average = history.recent_average(JUMP_SPAN);
                let recent_variance = history.recent_variance(JUMP_SPAN);
                if (enhanced - recent_average).abs() > self.jump_threshold
                    || recent_variance > self.variance_cutoff
                {
                    let damped = (enhanced * TRANSITION_DAMPING).max(TRANSITION_FLOOR);
                    return (CandidateOutcome::Transitioning, damped, false);
                }
            }

            if history.len() >= POLISH_MIN_LEN
                && history.recent_variance(POLISH_MIN_LEN) < POLISH_MAX_VARIANCE
                && enhanced > POLISH_MIN_CONFIDENCE
            {
                let polished = (enhanced * POLISH_MULTIPLIER).min(POLISH_CAP);
                return (CandidateOutcome::Steady, polished, true);
            }
        }

        (CandidateOutcome::Steady, enhanced, false)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// Helper: history of the given values under a wide window
    fn history_of(values: &[f64]) -> ClassHistory {
        let mut history = ClassHistory::default();
        for &value in values {
            history.push(value, 16);
        }
        history
    }

    fn smoothed(label: &str, blended: f64) -> SmoothedScore {
        SmoothedScore {
            label: label.to_string(),
            sample_mean: blended,
            blended,
        }
    }

    fn enhancer() -> ConfidenceEnhancer {
        ConfidenceEnhancer::new(&RecognitionConfig::default())
    }

    fn tracker() -> StabilityTracker {
        StabilityTracker::new(RecognitionConfig::default().max_stable_variance)
    }

    #[test]
    fn test_no_history_no_boosts() {
        let candidate = enhancer().enhance(&smoothed("Sit", 0.5), None, &tracker());
        assert_eq!(candidate.stability_boost, 0.0);
        assert_eq!(candidate.high_confidence_boost, 0.0);
        assert_eq!(candidate.enhanced, 0.5);
        assert_eq!(candidate.confidence, 0.5);
        assert_eq!(candidate.outcome, CandidateOutcome::Steady);
        assert!(!candidate.stability_boosted);
    }

    #[test]
    fn test_weak_reading_resolves_low_confidence() {
        let candidate = enhancer().enhance(&smoothed("Sit", 0.2), None, &tracker());
        assert_eq!(candidate.outcome, CandidateOutcome::LowConfidence);
        // the weak value itself is preserved for diagnostics
        assert_relative_eq!(candidate.confidence, 0.2, epsilon = 0.000001);
    }

    #[test]
    fn test_steady_history_earns_stability_boost() {
        let history = history_of(&[0.6, 0.6, 0.6, 0.6, 0.6]);
        let candidate = enhancer().enhance(&smoothed("Stand", 0.62), Some(&history), &tracker());

        // flat history scores 1.0: boost = 1.0 * 0.4 * 0.2
        assert_relative_eq!(candidate.stability_boost, 0.08, epsilon = 0.000001);
        // 0.62 also clears the high-confidence bar: 1.2 * (0.62 - 0.6)
        assert_relative_eq!(candidate.high_confidence_boost, 0.024, epsilon = 0.000001);
        assert_relative_eq!(candidate.enhanced, 0.724, epsilon = 0.000001);
        assert_eq!(candidate.outcome, CandidateOutcome::Steady);

        // five flat entries also trigger the very-stable polish
        assert!(candidate.stability_boosted);
        assert_relative_eq!(candidate.confidence, 0.8326, epsilon = 0.000001);
        assert!(candidate.confidence > 0.62);
        assert!(candidate.confidence <= 1.0);
    }

    #[test]
    fn test_high_confidence_amplification() {
        let candidate = enhancer().enhance(&smoothed("Warrior", 0.8), None, &tracker());
        // 1.2 * (0.8 - 0.6), then the sum clamps at 1.0
        assert_relative_eq!(candidate.high_confidence_boost, 0.24, epsilon = 0.000001);
        assert_eq!(candidate.enhanced, 1.0);
        assert_eq!(candidate.confidence, 1.0);
    }

    #[test]
    fn test_threshold_is_not_a_boost_trigger() {
        let candidate = enhancer().enhance(&smoothed("Warrior", 0.6), None, &tracker());
        // exactly at the high-confidence threshold: no amplification
        assert_eq!(candidate.high_confidence_boost, 0.0);
    }

    #[test]
    fn test_abrupt_jump_flags_transitioning() {
        // boosts disabled so the damped value is exact
        let config = RecognitionConfig {
            stability_weight: 0.0,
            high_confidence_threshold: 1.0,
            ..Default::default()
        };
        let enhancer = ConfidenceEnhancer::new(&config);
        let history = history_of(&[0.3, 0.35, 0.32]);

        let candidate = enhancer.enhance(&smoothed("Jump", 0.9), Some(&history), &tracker());
        assert_eq!(candidate.outcome, CandidateOutcome::Transitioning);
        assert_relative_eq!(candidate.confidence, 0.72, epsilon = 0.000001);
    }

    #[test]
    fn test_noisy_history_flags_transitioning() {
        // recent variance 0.16 trips the cutoff even with no jump
        let history = history_of(&[0.1, 0.9, 0.1, 0.9]);
        let candidate = enhancer().enhance(&smoothed("Chair", 0.5), Some(&history), &tracker());
        assert_eq!(candidate.outcome, CandidateOutcome::Transitioning);
        assert_relative_eq!(candidate.confidence, 0.4, epsilon = 0.000001);
    }

    #[test]
    fn test_low_confidence_wins_over_jump() {
        let history = history_of(&[0.9, 0.9]);
        let candidate = enhancer().enhance(&smoothed("Sit", 0.2), Some(&history), &tracker());
        // |0.2 - 0.9| far exceeds the jump threshold, but the weak
        // reading resolves first
        assert_eq!(candidate.outcome, CandidateOutcome::LowConfidence);
    }

    #[test]
    fn test_transition_confidence_floor() {
        let config = RecognitionConfig {
            confidence_threshold: 0.1,
            ..Default::default()
        };
        let enhancer = ConfidenceEnhancer::new(&config);
        let history = history_of(&[0.9, 0.9]);

        let candidate = enhancer.enhance(&smoothed("Sit", 0.12), Some(&history), &tracker());
        assert_eq!(candidate.outcome, CandidateOutcome::Transitioning);
        // 0.12 * 0.8 would be 0.096; the floor holds it at 0.15
        assert_relative_eq!(candidate.confidence, 0.15, epsilon = 0.000001);
    }

    #[test]
    fn test_polish_caps_at_ninety_five() {
        let history = history_of(&[0.9, 0.9, 0.9, 0.9, 0.9]);
        let candidate = enhancer().enhance(&smoothed("Tree", 0.9), Some(&history), &tracker());
        assert_eq!(candidate.outcome, CandidateOutcome::Steady);
        assert!(candidate.stability_boosted);
        assert_relative_eq!(candidate.confidence, 0.95, epsilon = 0.000001);
    }

    #[test]
    fn test_single_entry_skips_jump_check() {
        let history = history_of(&[0.9]);
        let candidate = enhancer().enhance(&smoothed("Sit", 0.3), Some(&history), &tracker());
        // a one-entry history is not enough evidence to call a jump
        assert_eq!(candidate.outcome, CandidateOutcome::Steady);
    }
}
