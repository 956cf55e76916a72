//! Engine tuning knobs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Tunable parameters for the recognition engine.
///
/// `default()` is the general-purpose tuning. The presets bundle
/// alternative snapshots for callers that want to trade latency for
/// steadiness without hand-picking individual knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Classifier passes collected per cycle
    pub sample_count: usize,
    /// Randomized delay between passes, in milliseconds (min, max)
    pub inter_sample_delay_ms: (u64, u64),
    /// Minimum enhanced confidence for an ordinary labeled result
    pub confidence_threshold: f64,
    /// Entries retained per label after a history trim
    pub stability_window: usize,
    /// Weight of recent history when blending per-cycle means
    pub temporal_smoothing: f64,
    /// Weight of the stability boost
    pub stability_weight: f64,
    /// Multiplier applied to the margin above `high_confidence_threshold`
    pub amplification_factor: f64,
    /// Confidence above which the amplification boost kicks in
    pub high_confidence_threshold: f64,
    /// Recent variance above which a winner is flagged as transitioning
    pub variance_cutoff: f64,
    /// Max deviation from the recent average before flagging a jump
    pub jump_threshold: f64,
    /// Per-sample probability a label must exceed to count as detected
    pub min_detection_floor: f64,
    /// Sets whose strongest probability falls below this are discarded
    pub weak_signal_floor: f64,
    /// Variance at which a label's stability score reaches zero
    pub max_stable_variance: f64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            sample_count: 5,
            inter_sample_delay_ms: (20, 40),
            confidence_threshold: 0.25,
            stability_window: 8,
            temporal_smoothing: 0.35,
            stability_weight: 0.4,
            amplification_factor: 1.2,
            high_confidence_threshold: 0.6,
            variance_cutoff: 0.08,
            jump_threshold: 0.3,
            min_detection_floor: 0.05,
            weak_signal_floor: 0.1,
            max_stable_variance: 0.1,
        }
    }
}

impl RecognitionConfig {
    /// Slower, steadier tuning: stricter threshold and a longer memory,
    /// at the cost of reacting a beat later to genuine pose changes.
    pub fn accuracy_tuned() -> Self {
        Self {
            confidence_threshold: 0.3,
            stability_window: 7,
            temporal_smoothing: 0.3,
            stability_weight: 0.35,
            ..Self::default()
        }
    }

    /// Conservative tuning for low-power deployments: fewer samples per
    /// cycle, a high bar for claiming a detection.
    pub fn conservative() -> Self {
        Self {
            sample_count: 3,
            inter_sample_delay_ms: (50, 50),
            confidence_threshold: 0.45,
            stability_window: 5,
            temporal_smoothing: 0.25,
            amplification_factor: 1.15,
            ..Self::default()
        }
    }

    /// Check that every knob is inside its usable range.
    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            bail!("sample_count must be at least 1");
        }
        let (min_delay, max_delay) = self.inter_sample_delay_ms;
        if min_delay > max_delay {
            bail!(
                "inter_sample_delay_ms min {} exceeds max {}",
                min_delay,
                max_delay
            );
        }
        if self.stability_window == 0 {
            bail!("stability_window must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            bail!(
                "confidence_threshold {} outside [0, 1]",
                self.confidence_threshold
            );
        }
        if !(0.0..1.0).contains(&self.temporal_smoothing) {
            bail!(
                "temporal_smoothing {} outside [0, 1)",
                self.temporal_smoothing
            );
        }
        if self.stability_weight < 0.0 {
            bail!("stability_weight {} is negative", self.stability_weight);
        }
        if self.amplification_factor < 0.0 {
            bail!(
                "amplification_factor {} is negative",
                self.amplification_factor
            );
        }
        if !(0.0..=1.0).contains(&self.high_confidence_threshold) {
            bail!(
                "high_confidence_threshold {} outside [0, 1]",
                self.high_confidence_threshold
            );
        }
        if self.variance_cutoff <= 0.0 {
            bail!("variance_cutoff {} must be positive", self.variance_cutoff);
        }
        if self.jump_threshold <= 0.0 {
            bail!("jump_threshold {} must be positive", self.jump_threshold);
        }
        if !(0.0..=1.0).contains(&self.min_detection_floor) {
            bail!(
                "min_detection_floor {} outside [0, 1]",
                self.min_detection_floor
            );
        }
        if !(0.0..=1.0).contains(&self.weak_signal_floor) {
            bail!(
                "weak_signal_floor {} outside [0, 1]",
                self.weak_signal_floor
            );
        }
        if self.max_stable_variance <= 0.0 {
            bail!(
                "max_stable_variance {} must be positive",
                self.max_stable_variance
            );
        }
        Ok(())
    }
}
