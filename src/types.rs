use serde::Serialize;

/// One step of the alignment script between the expected and transcribed
/// token sequences.
///
/// Expected-side operations (match, substitution, deletion) taken in order
/// reconstruct the expected sequence exactly; transcribed-side operations
/// (match, substitution, insertion) reconstruct the transcribed sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentOp {
    Match {
        expected: String,
        transcribed: String,
        expected_index: usize,
        transcribed_index: usize,
    },
    Substitution {
        expected: String,
        transcribed: String,
        expected_index: usize,
        transcribed_index: usize,
    },
    Deletion {
        expected: String,
        expected_index: usize,
    },
    Insertion {
        transcribed: String,
        transcribed_index: usize,
    },
}

/// Per-word verdict marker used in the word-by-word comparison trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WordStatus {
    #[serde(rename = "✓")]
    Correct,
    #[serde(rename = "✗")]
    Mispronounced,
    #[serde(rename = "−")]
    Missing,
    #[serde(rename = "+")]
    Extra,
}

impl WordStatus {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Correct => "✓",
            Self::Mispronounced => "✗",
            Self::Missing => "−",
            Self::Extra => "+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordMatch {
    pub word: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordMismatch {
    pub expected: String,
    pub actual: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordPosition {
    pub word: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordComparison {
    pub status: WordStatus,
    pub expected_word: Option<String>,
    pub transcribed_word: Option<String>,
}

/// Full outcome of one comparison request. Created fresh per call, never
/// shared or persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub transcribed_text: String,
    pub expected_text: String,
    /// Percentage of expected tokens matched exactly, in [0, 100].
    pub accuracy: f64,
    pub total_expected: usize,
    pub total_correct: usize,
    /// Positions index the expected sequence.
    pub correct_words: Vec<WordMatch>,
    /// Positions index the expected sequence.
    pub wrong_words: Vec<WordMismatch>,
    /// Positions index the expected sequence.
    pub missing_words: Vec<WordPosition>,
    /// Positions index the transcribed sequence.
    pub extra_words: Vec<WordPosition>,
    pub word_comparison: Vec<WordComparison>,
    pub feedback: String,
}
