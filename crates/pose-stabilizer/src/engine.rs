//! Recognition engine: one stable decision per cycle.

use std::collections::HashMap;

use pose_core::{Classification, Frame, PoseClassifier, PoseLabel};

use crate::aggregator::Aggregator;
use crate::config::RecognitionConfig;
use crate::decision::DecisionPolicy;
use crate::enhancer::{ConfidenceEnhancer, EnhancedCandidate};
use crate::history::{DetectionStats, HistoryStore};
use crate::sampler::Sampler;
use crate::stability::StabilityTracker;

/// Bounds accepted by `set_confidence_threshold`
const THRESHOLD_MIN: f64 = 0.1;
const THRESHOLD_MAX: f64 = 0.9;

/// Drives the full pipeline over a classifier backend.
///
/// Cycles run through `&mut self`, so two cycles on one engine can never
/// interleave. History commits only after the cycle's decision is final;
/// a cycle that degrades to a sentinel with no underlying label leaves
/// the stored state untouched.
pub struct RecognitionEngine<C> {
    classifier: C,
    config: RecognitionConfig,
    sampler: Sampler,
    aggregator: Aggregator,
    tracker: StabilityTracker,
    enhancer: ConfidenceEnhancer,
    decision: DecisionPolicy,
    history: HistoryStore,
}

impl<C: PoseClassifier> RecognitionEngine<C> {
    /// Engine with the default tuning
    pub fn new(classifier: C) -> Self {
        Self::from_parts(classifier, RecognitionConfig::default())
    }

    /// Engine with a custom tuning, rejected if any knob is out of range
    pub fn with_config(classifier: C, config: RecognitionConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(classifier, config))
    }

    fn from_parts(classifier: C, config: RecognitionConfig) -> Self {
        Self {
            sampler: Sampler::new(config.sample_count, config.inter_sample_delay_ms),
            aggregator: Aggregator::new(config.temporal_smoothing, config.weak_signal_floor),
            tracker: StabilityTracker::new(config.max_stable_variance),
            enhancer: ConfidenceEnhancer::new(&config),
            decision: DecisionPolicy::new(config.min_detection_floor),
            history: HistoryStore::new(config.stability_window),
            classifier,
            config,
        }
    }

    /// Run one recognition cycle over `frame`.
    ///
    /// Never fails: a cycle that cannot produce a labeled result degrades
    /// to a sentinel classification instead of an error.
    pub async fn recognize(&mut self, frame: &Frame) -> Classification {
        if !self.classifier.is_ready() {
            return Classification::no_model();
        }

        let raw = self.sampler.collect(&self.classifier, frame).await;
        if raw.is_empty() {
            return Classification::no_detection();
        }

        let sets = self.aggregator.filter_weak(raw);
        if sets.is_empty() {
            tracing::debug!("every sample set fell below the weak-signal floor");
            return Classification::no_detection();
        }

        let smoothed = self.aggregator.smooth(&sets, &self.history);
        let candidates: Vec<EnhancedCandidate> = smoothed
            .iter()
            .map(|score| {
                self.enhancer
                    .enhance(score, self.history.get(&score.label), &self.tracker)
            })
            .collect();

        let result = self.decision.decide(&candidates, &sets);
        self.commit(&result);

        tracing::debug!(
            "cycle resolved to {} at {:.3} over {} sets",
            result.label.name(),
            result.confidence,
            sets.len()
        );
        result
    }

    /// Record the cycle's final confidence under the right label.
    ///
    /// A sentinel outcome backed by a real label is recorded under that
    /// label: a genuine pose change keeps accumulating history, so the
    /// transition settles instead of repeating every cycle.
    fn commit(&mut self, result: &Classification) {
        match &result.label {
            PoseLabel::Pose(label) => self.history.record(label, result.confidence),
            PoseLabel::Unknown | PoseLabel::Transitioning => {
                if let Some(original) = &result.original_label {
                    self.history.record(original, result.confidence);
                }
            }
            PoseLabel::NoModel | PoseLabel::NoDetection => {}
        }
    }

    /// Forget all committed history
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Per-label diagnostic statistics
    pub fn detection_stats(&self) -> HashMap<String, DetectionStats> {
        self.history.detection_stats()
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Adjust the confidence threshold at runtime, clamped to [0.1, 0.9].
    /// Non-finite requests are ignored.
    pub fn set_confidence_threshold(&mut self, threshold: f64) {
        if !threshold.is_finite() {
            tracing::warn!("ignoring non-finite confidence threshold");
            return;
        }
        let clamped = threshold.clamp(THRESHOLD_MIN, THRESHOLD_MAX);
        if (clamped - threshold).abs() > f64::EPSILON {
            tracing::warn!("confidence threshold {} clamped to {}", threshold, clamped);
        }
        self.config.confidence_threshold = clamped;
        self.enhancer = ConfidenceEnhancer::new(&self.config);
    }
}
