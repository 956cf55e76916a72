//! Pose Stabilizer Module
//!
//! Turns noisy, repeated pose-classifier outputs into one stable
//! (label, confidence) decision per cycle. Each cycle samples the
//! classifier several times, smooths the per-label means against recent
//! history, boosts confidence for labels that have been holding steady,
//! and picks a winner weighted by how consistently it was detected.

pub mod aggregator;
pub mod config;
pub mod decision;
pub mod engine;
pub mod enhancer;
pub mod history;
pub mod sampler;
pub mod stability;


pub use aggregator::{Aggregator, SmoothedScore};
pub use config::RecognitionConfig;
pub use decision::DecisionPolicy;
pub use engine::RecognitionEngine;
pub use enhancer::{CandidateOutcome, ConfidenceEnhancer, EnhancedCandidate};
pub use history::{ClassHistory, DetectionStats, HistoryStore};
pub use sampler::Sampler;
pub use stability::StabilityTracker;
