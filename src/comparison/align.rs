use crate::types::AlignmentOp;

const MATCH_SCORE: i64 = 2;
const MISMATCH_SCORE: i64 = -1;
const GAP_SCORE: i64 = -1;

const STEP_DIAG: u8 = 0;
const STEP_DELETE: u8 = 1;
const STEP_INSERT: u8 = 2;

/// Word-level sequence alignment between the expected and transcribed token
/// sequences.
///
/// Scores: +2 for an equal pair, -1 for an unequal pair, -1 per gap. Ties
/// resolve diagonal over delete over insert; the diagonal step is taken even
/// for unequal pairs, producing a substitution. The preference order decides
/// which operations appear whenever scores tie, so it must not change.
///
/// O(n*m) time; the score table is kept as two rolling rows while the
/// backtrace uses a full predecessor-direction table of one byte per cell.
pub fn align_words(expected: &[String], transcribed: &[String]) -> Vec<AlignmentOp> {
    let n = expected.len();
    let m = transcribed.len();

    let width = m + 1;
    let mut prev = vec![0i64; width];
    let mut curr = vec![0i64; width];
    let mut steps = vec![STEP_DIAG; (n + 1) * width];

    for j in 1..=m {
        prev[j] = -(j as i64);
        steps[j] = STEP_INSERT;
    }

    for i in 1..=n {
        curr[0] = -(i as i64);
        steps[i * width] = STEP_DELETE;
        for j in 1..=m {
            let pair_score = if expected[i - 1] == transcribed[j - 1] {
                MATCH_SCORE
            } else {
                MISMATCH_SCORE
            };
            let diagonal = prev[j - 1] + pair_score;
            let delete = prev[j] + GAP_SCORE;
            let insert = curr[j - 1] + GAP_SCORE;

            let (score, step) = if diagonal >= delete && diagonal >= insert {
                (diagonal, STEP_DIAG)
            } else if delete >= insert {
                (delete, STEP_DELETE)
            } else {
                (insert, STEP_INSERT)
            };
            curr[j] = score;
            steps[i * width + j] = step;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let mut ops = Vec::with_capacity(n + m);
    let mut i = n;
    let mut j = m;
    while i > 0 || j > 0 {
        match steps[i * width + j] {
            STEP_DIAG => {
                debug_assert!(i > 0 && j > 0);
                let expected_word = expected[i - 1].clone();
                let transcribed_word = transcribed[j - 1].clone();
                if expected_word == transcribed_word {
                    ops.push(AlignmentOp::Match {
                        expected: expected_word,
                        transcribed: transcribed_word,
                        expected_index: i - 1,
                        transcribed_index: j - 1,
                    });
                } else {
                    ops.push(AlignmentOp::Substitution {
                        expected: expected_word,
                        transcribed: transcribed_word,
                        expected_index: i - 1,
                        transcribed_index: j - 1,
                    });
                }
                i -= 1;
                j -= 1;
            }
            STEP_DELETE => {
                debug_assert!(i > 0);
                ops.push(AlignmentOp::Deletion {
                    expected: expected[i - 1].clone(),
                    expected_index: i - 1,
                });
                i -= 1;
            }
            _ => {
                debug_assert!(j > 0);
                ops.push(AlignmentOp::Insertion {
                    transcribed: transcribed[j - 1].clone(),
                    transcribed_index: j - 1,
                });
                j -= 1;
            }
        }
    }

    ops.reverse();
    ops
}
