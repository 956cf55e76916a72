//! Repeated classifier sampling with jittered pacing.

use std::time::Duration;

use pose_core::{Frame, PoseClassifier, PredictionSet};
use rand::Rng;

/// Collects several classifier passes per recognition cycle
#[derive(Debug, Clone)]
pub struct Sampler {
    sample_count: usize,
    delay_range_ms: (u64, u64),
}

impl Sampler {
    pub fn new(sample_count: usize, delay_range_ms: (u64, u64)) -> Self {
        Self {
            sample_count,
            delay_range_ms,
        }
    }

    /// Run up to `sample_count` passes over the frame.
    ///
    /// A failed or empty pass is logged and skipped; the cycle carries on
    /// with whatever sets were collected. Passes are spaced by a small
    /// randomized delay so consecutive reads do not all land on the same
    /// rendered frame.
    pub async fn collect<C>(&self, classifier: &C, frame: &Frame) -> Vec<PredictionSet>
    where
        C: PoseClassifier,
    {
        let mut sets = Vec::with_capacity(self.sample_count);
        for attempt in 0..self.sample_count {
            match classifier.classify(frame).await {
                Ok(set) if !set.is_empty() => sets.push(set),
                Ok(_) => {
                    tracing::debug!(
                        "sample {}/{} came back empty",
                        attempt + 1,
                        self.sample_count
                    );
                }
                Err(e) => {
                    tracing::warn!("sample {}/{} failed: {}", attempt + 1, self.sample_count, e);
                }
            }
            if attempt + 1 < self.sample_count {
                tokio::time::sleep(self.jitter()).await;
            }
        }
        sets
    }

    fn jitter(&self) -> Duration {
        let (min, max) = self.delay_range_ms;
        let ms = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        Duration::from_millis(ms)
    }
}
