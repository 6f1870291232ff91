use crate::types::{
    AlignmentOp, ComparisonResult, WordComparison, WordMatch, WordMismatch, WordPosition,
    WordStatus,
};

const EMPTY_EXPECTED_FEEDBACK: &str = "No expected text provided";

/// Result for the short-circuit case where normalization of the expected
/// text produced no tokens. Alignment is bypassed entirely.
pub fn empty_expected_result(transcribed_text: &str, expected_text: &str) -> ComparisonResult {
    ComparisonResult {
        transcribed_text: transcribed_text.to_string(),
        expected_text: expected_text.to_string(),
        accuracy: 0.0,
        total_expected: 0,
        total_correct: 0,
        correct_words: Vec::new(),
        wrong_words: Vec::new(),
        missing_words: Vec::new(),
        extra_words: Vec::new(),
        word_comparison: Vec::new(),
        feedback: EMPTY_EXPECTED_FEEDBACK.to_string(),
    }
}

/// Walk the alignment in order, classify every operation, and derive the
/// accuracy score and feedback text.
///
/// Accuracy is computed over the expected-side token count only, so
/// insertions can never lower it.
pub fn build_result(
    transcribed_text: &str,
    expected_text: &str,
    alignment: &[AlignmentOp],
) -> ComparisonResult {
    let mut correct_words = Vec::new();
    let mut wrong_words = Vec::new();
    let mut missing_words = Vec::new();
    let mut extra_words = Vec::new();
    let mut word_comparison = Vec::with_capacity(alignment.len());

    for op in alignment {
        match op {
            AlignmentOp::Match {
                expected,
                transcribed,
                expected_index,
                ..
            } => {
                correct_words.push(WordMatch {
                    word: expected.clone(),
                    position: *expected_index,
                });
                word_comparison.push(WordComparison {
                    status: WordStatus::Correct,
                    expected_word: Some(expected.clone()),
                    transcribed_word: Some(transcribed.clone()),
                });
            }
            AlignmentOp::Substitution {
                expected,
                transcribed,
                expected_index,
                ..
            } => {
                wrong_words.push(WordMismatch {
                    expected: expected.clone(),
                    actual: transcribed.clone(),
                    position: *expected_index,
                });
                word_comparison.push(WordComparison {
                    status: WordStatus::Mispronounced,
                    expected_word: Some(expected.clone()),
                    transcribed_word: Some(transcribed.clone()),
                });
            }
            AlignmentOp::Deletion {
                expected,
                expected_index,
            } => {
                missing_words.push(WordPosition {
                    word: expected.clone(),
                    position: *expected_index,
                });
                word_comparison.push(WordComparison {
                    status: WordStatus::Missing,
                    expected_word: Some(expected.clone()),
                    transcribed_word: None,
                });
            }
            AlignmentOp::Insertion {
                transcribed,
                transcribed_index,
            } => {
                extra_words.push(WordPosition {
                    word: transcribed.clone(),
                    position: *transcribed_index,
                });
                word_comparison.push(WordComparison {
                    status: WordStatus::Extra,
                    expected_word: None,
                    transcribed_word: Some(transcribed.clone()),
                });
            }
        }
    }

    let total_expected = correct_words.len() + wrong_words.len() + missing_words.len();
    let total_correct = correct_words.len();
    let accuracy = if total_expected > 0 {
        total_correct as f64 * 100.0 / total_expected as f64
    } else {
        0.0
    };

    let feedback = generate_feedback(
        accuracy,
        total_correct,
        total_expected,
        wrong_words.len(),
        missing_words.len(),
        extra_words.len(),
    );

    ComparisonResult {
        transcribed_text: transcribed_text.to_string(),
        expected_text: expected_text.to_string(),
        accuracy,
        total_expected,
        total_correct,
        correct_words,
        wrong_words,
        missing_words,
        extra_words,
        word_comparison,
        feedback,
    }
}

fn generate_feedback(
    accuracy: f64,
    correct_count: usize,
    total_words: usize,
    wrong_count: usize,
    missing_count: usize,
    extra_count: usize,
) -> String {
    let mut feedback = String::new();

    if accuracy >= 90.0 {
        feedback.push_str("🌟 Excellent! Your pronunciation is very clear!");
    } else if accuracy >= 70.0 {
        feedback.push_str("👍 Good! You're doing well. Keep practicing to improve.");
    } else if accuracy >= 50.0 {
        feedback.push_str("💪 Not bad! Focus on the words marked above to improve.");
    } else {
        feedback.push_str("📚 Keep practicing! Focus on clear pronunciation of the words marked above.");
    }

    feedback.push_str("\n\n");
    feedback.push_str(&format!(
        "Correct words: {correct_count}/{total_words} ({accuracy:.1}%)"
    ));

    if wrong_count > 0 {
        feedback.push_str(&format!("\nWrong/Mispronounced words: {wrong_count}"));
    }
    if missing_count > 0 {
        feedback.push_str(&format!("\nMissing words: {missing_count}"));
    }
    if extra_count > 0 {
        feedback.push_str(&format!("\nExtra words: {extra_count}"));
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_op(word: &str, index: usize) -> AlignmentOp {
        AlignmentOp::Match {
            expected: word.to_string(),
            transcribed: word.to_string(),
            expected_index: index,
            transcribed_index: index,
        }
    }

    #[test]
    fn empty_expected_short_circuit() {
        let result = empty_expected_result("anything", "");
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.total_expected, 0);
        assert_eq!(result.total_correct, 0);
        assert!(result.correct_words.is_empty());
        assert!(result.wrong_words.is_empty());
        assert!(result.missing_words.is_empty());
        assert!(result.extra_words.is_empty());
        assert!(result.word_comparison.is_empty());
        assert_eq!(result.feedback, "No expected text provided");
        assert_eq!(result.transcribed_text, "anything");
    }

    #[test]
    fn all_matches_score_one_hundred() {
        let alignment = vec![match_op("good", 0), match_op("morning", 1)];
        let result = build_result("good morning", "good morning", &alignment);
        assert_eq!(result.accuracy, 100.0);
        assert_eq!(result.total_expected, 2);
        assert_eq!(result.total_correct, 2);
        assert!(result.wrong_words.is_empty());
        assert!(result.feedback.starts_with("🌟"));
        assert!(result.feedback.contains("Correct words: 2/2 (100.0%)"));
    }

    #[test]
    fn substitution_is_classified_as_wrong_word() {
        let alignment = vec![
            match_op("i", 0),
            match_op("love", 1),
            AlignmentOp::Substitution {
                expected: "cats".to_string(),
                transcribed: "dogs".to_string(),
                expected_index: 2,
                transcribed_index: 2,
            },
        ];
        let result = build_result("i love dogs", "i love cats", &alignment);
        assert_eq!(result.total_expected, 3);
        assert_eq!(result.total_correct, 2);
        assert!((result.accuracy - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            result.wrong_words,
            vec![WordMismatch {
                expected: "cats".to_string(),
                actual: "dogs".to_string(),
                position: 2,
            }]
        );
        assert!(result.feedback.contains("Wrong/Mispronounced words: 1"));
        assert!(!result.feedback.contains("Missing words"));
        assert!(!result.feedback.contains("Extra words"));
    }

    #[test]
    fn deletion_and_insertion_are_classified() {
        let alignment = vec![
            match_op("see", 0),
            AlignmentOp::Deletion {
                expected: "you".to_string(),
                expected_index: 1,
            },
            AlignmentOp::Insertion {
                transcribed: "now".to_string(),
                transcribed_index: 1,
            },
        ];
        let result = build_result("see now", "see you", &alignment);
        assert_eq!(
            result.missing_words,
            vec![WordPosition {
                word: "you".to_string(),
                position: 1,
            }]
        );
        assert_eq!(
            result.extra_words,
            vec![WordPosition {
                word: "now".to_string(),
                position: 1,
            }]
        );
        assert!(result.feedback.contains("Missing words: 1"));
        assert!(result.feedback.contains("Extra words: 1"));
    }

    #[test]
    fn insertions_do_not_reduce_accuracy() {
        // Accuracy is a fraction of expected-side tokens only. An extra
        // transcribed word leaves it at 100%.
        let alignment = vec![
            match_op("good", 0),
            AlignmentOp::Insertion {
                transcribed: "very".to_string(),
                transcribed_index: 1,
            },
            AlignmentOp::Match {
                expected: "morning".to_string(),
                transcribed: "morning".to_string(),
                expected_index: 1,
                transcribed_index: 2,
            },
        ];
        let result = build_result("good very morning", "good morning", &alignment);
        assert_eq!(result.accuracy, 100.0);
        assert_eq!(result.total_expected, 2);
        assert_eq!(result.extra_words.len(), 1);
    }

    #[test]
    fn trace_carries_one_entry_per_operation_with_markers() {
        let alignment = vec![
            match_op("a", 0),
            AlignmentOp::Substitution {
                expected: "b".to_string(),
                transcribed: "x".to_string(),
                expected_index: 1,
                transcribed_index: 1,
            },
            AlignmentOp::Deletion {
                expected: "c".to_string(),
                expected_index: 2,
            },
            AlignmentOp::Insertion {
                transcribed: "y".to_string(),
                transcribed_index: 2,
            },
        ];
        let result = build_result("a x y", "a b c", &alignment);
        let markers: Vec<&str> = result
            .word_comparison
            .iter()
            .map(|entry| entry.status.symbol())
            .collect();
        assert_eq!(markers, ["✓", "✗", "−", "+"]);
        assert_eq!(result.word_comparison[2].transcribed_word, None);
        assert_eq!(result.word_comparison[3].expected_word, None);
    }

    #[test]
    fn feedback_tiers_switch_on_accuracy() {
        assert!(generate_feedback(95.0, 19, 20, 1, 0, 0).starts_with("🌟"));
        assert!(generate_feedback(90.0, 9, 10, 1, 0, 0).starts_with("🌟"));
        assert!(generate_feedback(75.0, 3, 4, 1, 0, 0).starts_with("👍"));
        assert!(generate_feedback(50.0, 1, 2, 1, 0, 0).starts_with("💪"));
        assert!(generate_feedback(25.0, 1, 4, 3, 0, 0).starts_with("📚"));
    }

    #[test]
    fn classification_counts_satisfy_expected_total_invariant() {
        let alignment = vec![
            match_op("a", 0),
            AlignmentOp::Substitution {
                expected: "b".to_string(),
                transcribed: "x".to_string(),
                expected_index: 1,
                transcribed_index: 1,
            },
            AlignmentOp::Deletion {
                expected: "c".to_string(),
                expected_index: 2,
            },
            AlignmentOp::Insertion {
                transcribed: "y".to_string(),
                transcribed_index: 2,
            },
        ];
        let result = build_result("a x y", "a b c", &alignment);
        assert_eq!(
            result.total_correct + result.wrong_words.len() + result.missing_words.len(),
            result.total_expected
        );
    }
}
