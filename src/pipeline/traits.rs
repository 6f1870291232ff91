use crate::types::{AlignmentOp, ComparisonResult};

pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> Vec<String>;
}

pub trait SequenceAligner: Send + Sync {
    fn align(&self, expected: &[String], transcribed: &[String]) -> Vec<AlignmentOp>;
}

pub trait FeedbackReporter: Send + Sync {
    fn report(
        &self,
        transcribed_text: &str,
        expected_text: &str,
        alignment: &[AlignmentOp],
    ) -> ComparisonResult;

    /// Short-circuit result for an expected text that normalized to nothing.
    fn empty_expected(&self, transcribed_text: &str, expected_text: &str) -> ComparisonResult;
}
