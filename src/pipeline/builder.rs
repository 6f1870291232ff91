use crate::config::{ContractionTable, EngineConfig};
use crate::error::ComparisonError;
use crate::pipeline::defaults::{ContractionNormalizer, ScoredSequenceAligner, TieredReporter};
use crate::pipeline::runtime::{ComparisonEngine, ComparisonEngineParts};
use crate::pipeline::traits::{FeedbackReporter, Normalizer, SequenceAligner};

pub struct ComparisonEngineBuilder {
    config: EngineConfig,
    normalizer: Option<Box<dyn Normalizer>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    reporter: Option<Box<dyn FeedbackReporter>>,
}

impl ComparisonEngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            normalizer: None,
            sequence_aligner: None,
            reporter: None,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_reporter(mut self, reporter: Box<dyn FeedbackReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> Result<ComparisonEngine, ComparisonError> {
        if self.config.max_tokens == 0 {
            return Err(ComparisonError::invalid_input(
                "max_tokens must be at least 1",
            ));
        }

        let normalizer = match self.normalizer {
            Some(normalizer) => normalizer,
            None => Box::new(ContractionNormalizer::new(ContractionTable::build()?)),
        };

        Ok(ComparisonEngine::from_parts(ComparisonEngineParts {
            max_tokens: self.config.max_tokens,
            normalizer,
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(ScoredSequenceAligner)),
            reporter: self.reporter.unwrap_or_else(|| Box::new(TieredReporter)),
        }))
    }
}
