pub mod comparison;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use comparison::aggregate::{
    aggregate_cases, AggregateCounts, AggregateReport, CaseReport, Meta, MetricDistribution,
    OutlierEntry, Report, SCHEMA_VERSION,
};
pub use config::{ContractionTable, EngineConfig, RecognizerConfig};
pub use error::ComparisonError;
pub use pipeline::builder::ComparisonEngineBuilder;
pub use pipeline::runtime::ComparisonEngine;
pub use pipeline::traits::{FeedbackReporter, Normalizer, SequenceAligner};
pub use pipeline::transcription::{PracticeSession, TranscriptionClient};
pub use types::{
    AlignmentOp, ComparisonResult, WordComparison, WordMatch, WordMismatch, WordPosition,
    WordStatus,
};
