use std::time::Duration;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use crate::error::ComparisonError;

/// Contraction -> expansion pairs applied during normalization.
///
/// Matching is whole-word only: a contraction never expands when it appears
/// as a substring of a longer word.
const CONTRACTIONS: &[(&str, &[&str])] = &[
    ("there's", &["there", "is"]),
    ("it's", &["it", "is"]),
    ("that's", &["that", "is"]),
    ("what's", &["what", "is"]),
    ("who's", &["who", "is"]),
    ("where's", &["where", "is"]),
    ("here's", &["here", "is"]),
    ("he's", &["he", "is"]),
    ("she's", &["she", "is"]),
    ("we're", &["we", "are"]),
    ("they're", &["they", "are"]),
    ("you're", &["you", "are"]),
    ("i'm", &["i", "am"]),
    ("i've", &["i", "have"]),
    ("i'll", &["i", "will"]),
    ("can't", &["can", "not"]),
    ("won't", &["will", "not"]),
    ("don't", &["do", "not"]),
    ("doesn't", &["does", "not"]),
    ("didn't", &["did", "not"]),
    ("isn't", &["is", "not"]),
    ("aren't", &["are", "not"]),
    ("wasn't", &["was", "not"]),
    ("weren't", &["were", "not"]),
    ("hasn't", &["has", "not"]),
    ("haven't", &["have", "not"]),
    ("hadn't", &["had", "not"]),
];

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on normalized token count per input text. The alignment
    /// table is O(n*m), so oversized inputs are rejected before alignment.
    pub max_tokens: usize,
}

impl EngineConfig {
    pub const DEFAULT_MAX_TOKENS: usize = 1_000;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl RecognizerConfig {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000/api/transcribe";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Immutable contraction-expansion table, compiled once at engine
/// construction and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ContractionTable {
    automaton: AhoCorasick,
    expansions: Vec<String>,
}

impl ContractionTable {
    pub fn build() -> Result<Self, ComparisonError> {
        // Leftmost-longest so "she's" beats an interior "he's" candidate.
        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .build(CONTRACTIONS.iter().map(|(contraction, _)| contraction))
            .map_err(|e| {
                ComparisonError::invalid_input(format!("contraction table build failed: {e}"))
            })?;
        let expansions = CONTRACTIONS
            .iter()
            .map(|(_, replacement)| replacement.join(" "))
            .collect();
        Ok(Self {
            automaton,
            expansions,
        })
    }

    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }

    /// Expand every whole-word contraction occurrence in `text`.
    ///
    /// The caller is expected to pass lowercased text; the pattern set is
    /// lowercase only. A candidate match is accepted only when the characters
    /// immediately before and after it are not alphanumeric.
    pub fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut tail_start = 0;
        for found in self.automaton.find_iter(text) {
            if !is_word_boundary(text, found.start(), found.end()) {
                continue;
            }
            out.push_str(&text[tail_start..found.start()]);
            out.push_str(&self.expansions[found.pattern().as_usize()]);
            tail_start = found.end();
        }
        out.push_str(&text[tail_start..]);
        out
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}
