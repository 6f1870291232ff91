use crate::error::ComparisonError;
use crate::pipeline::traits::{FeedbackReporter, Normalizer, SequenceAligner};
use crate::types::ComparisonResult;

/// Stateless comparison engine. Holds only read-only configuration and the
/// three pipeline strategies, so a single instance can serve concurrent
/// callers without synchronization.
pub struct ComparisonEngine {
    max_tokens: usize,
    normalizer: Box<dyn Normalizer>,
    sequence_aligner: Box<dyn SequenceAligner>,
    reporter: Box<dyn FeedbackReporter>,
}

pub(crate) struct ComparisonEngineParts {
    pub max_tokens: usize,
    pub normalizer: Box<dyn Normalizer>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub reporter: Box<dyn FeedbackReporter>,
}

impl ComparisonEngine {
    pub(crate) fn from_parts(parts: ComparisonEngineParts) -> Self {
        Self {
            max_tokens: parts.max_tokens,
            normalizer: parts.normalizer,
            sequence_aligner: parts.sequence_aligner,
            reporter: parts.reporter,
        }
    }

    /// Compare a transcribed text against the expected reference text.
    ///
    /// Input-shape conditions (empty or blank text on either side) always
    /// produce a well-formed result. The only error is an oversized input:
    /// token counts above the configured bound are rejected before the
    /// O(n*m) alignment table is built.
    pub fn compare_texts(
        &self,
        transcribed_text: &str,
        expected_text: &str,
    ) -> Result<ComparisonResult, ComparisonError> {
        let expected_words = self.normalizer.normalize(expected_text);
        if expected_words.is_empty() {
            tracing::debug!("expected text normalized to nothing, short-circuiting");
            return Ok(self
                .reporter
                .empty_expected(transcribed_text, expected_text));
        }
        let transcribed_words = self.normalizer.normalize(transcribed_text);

        self.check_token_bound("expected", expected_words.len())?;
        self.check_token_bound("transcribed", transcribed_words.len())?;

        let alignment = self
            .sequence_aligner
            .align(&expected_words, &transcribed_words);
        let result = self
            .reporter
            .report(transcribed_text, expected_text, &alignment);

        tracing::debug!(
            accuracy = result.accuracy,
            total_expected = result.total_expected,
            total_correct = result.total_correct,
            "comparison complete"
        );
        Ok(result)
    }

    fn check_token_bound(&self, side: &str, token_count: usize) -> Result<(), ComparisonError> {
        if token_count > self.max_tokens {
            tracing::warn!(
                side,
                token_count,
                max_tokens = self.max_tokens,
                "rejecting oversized comparison input"
            );
            return Err(ComparisonError::invalid_input(format!(
                "{side} text too long: {token_count} tokens exceeds the limit of {}",
                self.max_tokens
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::pipeline::builder::ComparisonEngineBuilder;

    fn engine() -> ComparisonEngine {
        ComparisonEngineBuilder::new(EngineConfig::default())
            .build()
            .expect("default engine builds")
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_is_send_and_sync() {
        assert_send_sync::<ComparisonEngine>();
    }

    #[test]
    fn identical_texts_score_one_hundred() {
        let result = engine()
            .compare_texts("The quick brown fox", "The quick brown fox")
            .unwrap();
        assert_eq!(result.accuracy, 100.0);
        assert_eq!(result.total_expected, 4);
        assert_eq!(result.total_correct, 4);
        assert!(result.wrong_words.is_empty());
        assert!(result.missing_words.is_empty());
        assert!(result.extra_words.is_empty());
    }

    #[test]
    fn empty_expected_short_circuits() {
        let result = engine().compare_texts("anything", "").unwrap();
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.total_expected, 0);
        assert!(result.extra_words.is_empty());
        assert_eq!(result.feedback, "No expected text provided");
    }

    #[test]
    fn empty_transcribed_marks_everything_missing() {
        let result = engine().compare_texts("", "see you later").unwrap();
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.total_expected, 3);
        assert_eq!(result.missing_words.len(), 3);
        assert!(result.correct_words.is_empty());
    }

    #[test]
    fn oversized_expected_input_is_rejected() {
        let engine = ComparisonEngineBuilder::new(EngineConfig { max_tokens: 3 })
            .build()
            .unwrap();
        let err = engine
            .compare_texts("short", "one two three four")
            .unwrap_err();
        assert!(matches!(err, ComparisonError::InvalidInput { .. }));
    }

    #[test]
    fn oversized_transcribed_input_is_rejected() {
        let engine = ComparisonEngineBuilder::new(EngineConfig { max_tokens: 3 })
            .build()
            .unwrap();
        let err = engine
            .compare_texts("one two three four", "short text here")
            .unwrap_err();
        assert!(matches!(err, ComparisonError::InvalidInput { .. }));
    }

    #[test]
    fn expected_side_counts_always_balance() {
        let pairs = [
            ("i love dogs", "i love cats"),
            ("see later", "see you later"),
            ("good very morning", "good morning"),
            ("completely different words", "nothing in common here"),
            ("", "a b c"),
            ("x y z", "x z"),
        ];
        let engine = engine();
        for (transcribed, expected) in pairs {
            let result = engine.compare_texts(transcribed, expected).unwrap();
            assert_eq!(
                result.total_correct + result.wrong_words.len() + result.missing_words.len(),
                result.total_expected,
                "invariant violated for ({transcribed:?}, {expected:?})"
            );
        }
    }

    #[test]
    fn concurrent_comparisons_agree_with_sequential() {
        let engine = engine();
        let sequential = engine.compare_texts("i love dogs", "i love cats").unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let engine = &engine;
                    scope.spawn(move || engine.compare_texts("i love dogs", "i love cats").unwrap())
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), sequential);
            }
        });
    }
}
