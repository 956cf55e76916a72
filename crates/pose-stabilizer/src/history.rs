//! Per-label confidence history.
//!
//! Every committed cycle appends the final confidence under the winning
//! label. Histories are bounded: once a label collects more than twice
//! the stability window, the oldest half is dropped in one cut, so
//! steady-state memory per label stays between W and 2W entries.

use std::collections::HashMap;

use pose_core::stats;
use serde::{Deserialize, Serialize};

use crate::stability::STABILITY_SPAN;

/// Bounded FIFO of final confidences for one label
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassHistory {
    entries: Vec<f64>,
}

impl ClassHistory {
    /// Append a confidence, trimming back to `window` entries once the
    /// history grows past twice that
    pub fn push(&mut self, confidence: f64, window: usize) {
        self.entries.push(confidence);
        if self.entries.len() > window * 2 {
            let cut = self.entries.len() - window;
            self.entries.drain(..cut);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.entries
    }

    /// Slice holding the most recent `span` entries (all of them when
    /// fewer are stored)
    pub fn recent(&self, span: usize) -> &[f64] {
        let start = self.entries.len().saturating_sub(span);
        &self.entries[start..]
    }

    /// Mean of the most recent `span` entries (0.0 when empty)
    pub fn recent_average(&self, span: usize) -> f64 {
        stats::mean(self.recent(span))
    }

    /// Population variance of the most recent `span` entries
    pub fn recent_variance(&self, span: usize) -> f64 {
        stats::variance(self.recent(span))
    }
}

/// Diagnostic statistics for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    /// Stored history entries for the label
    pub count: usize,
    /// Mean confidence over the stored history
    pub mean_confidence: f64,
    /// Variance over the most recent entries
    pub recent_variance: f64,
}

/// All per-label histories for one engine instance
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    window: usize,
    histories: HashMap<String, ClassHistory>,
}

impl HistoryStore {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            histories: HashMap::new(),
        }
    }

    /// Commit a final confidence under `label`
    pub fn record(&mut self, label: &str, confidence: f64) {
        self.histories
            .entry(label.to_string())
            .or_default()
            .push(confidence, self.window);
    }

    pub fn get(&self, label: &str) -> Option<&ClassHistory> {
        self.histories.get(label)
    }

    /// Stored entry count for `label` (0 when never seen)
    pub fn len_of(&self, label: &str) -> usize {
        self.histories.get(label).map_or(0, ClassHistory::len)
    }

    /// Mean of the label's most recent `span` entries (0.0 when absent)
    pub fn recent_average(&self, label: &str, span: usize) -> f64 {
        self.histories
            .get(label)
            .map_or(0.0, |h| h.recent_average(span))
    }

    /// Drop all stored histories
    pub fn clear(&mut self) {
        self.histories.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Diagnostic snapshot across every label seen so far
    pub fn detection_stats(&self) -> HashMap<String, DetectionStats> {
        self.histories
            .iter()
            .map(|(label, history)| {
                (
                    label.clone(),
                    DetectionStats {
                        count: history.len(),
                        mean_confidence: stats::mean(history.values()),
                        recent_variance: history.recent_variance(STABILITY_SPAN),
                    },
                )
            })
            .collect()
    }
}
