use crate::comparison::align::align_words;
use crate::comparison::normalize::normalize_text;
use crate::comparison::report::{build_result, empty_expected_result};
use crate::config::ContractionTable;
use crate::pipeline::traits::{FeedbackReporter, Normalizer, SequenceAligner};
use crate::types::{AlignmentOp, ComparisonResult};

pub struct ContractionNormalizer {
    contractions: ContractionTable,
}

impl ContractionNormalizer {
    pub fn new(contractions: ContractionTable) -> Self {
        Self { contractions }
    }
}

impl Normalizer for ContractionNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        normalize_text(text, &self.contractions)
    }
}

pub struct ScoredSequenceAligner;

impl SequenceAligner for ScoredSequenceAligner {
    fn align(&self, expected: &[String], transcribed: &[String]) -> Vec<AlignmentOp> {
        align_words(expected, transcribed)
    }
}

pub struct TieredReporter;

impl FeedbackReporter for TieredReporter {
    fn report(
        &self,
        transcribed_text: &str,
        expected_text: &str,
        alignment: &[AlignmentOp],
    ) -> ComparisonResult {
        build_result(transcribed_text, expected_text, alignment)
    }

    fn empty_expected(&self, transcribed_text: &str, expected_text: &str) -> ComparisonResult {
        empty_expected_result(transcribed_text, expected_text)
    }
}
