use crate::{ClassifierError, Frame, PredictionSet};
use async_trait::async_trait;

/// Trait for pose classifier backends.
///
/// The vocabulary is fixed by the implementation and opaque to the
/// recognition pipeline: every returned set carries one sample per
/// vocabulary label, in a stable order.
#[async_trait]
pub trait PoseClassifier: Send + Sync {
    /// Run one inference pass over the frame
    async fn classify(&self, frame: &Frame) -> Result<PredictionSet, ClassifierError>;

    /// Whether the underlying model is loaded and ready to serve
    fn is_ready(&self) -> bool;
}
