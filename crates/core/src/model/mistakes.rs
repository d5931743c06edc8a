use crate::model::quiz::QuizQuestion;

/// Course text handed to the explanation prompt is capped at this many chars.
pub const EXPLANATION_CONTEXT_CHARS: usize = 2000;

/// A question the user answered wrongly (or not at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake {
    pub question: String,
    /// Text of the option the user chose; `None` when unanswered or out of range.
    pub user_answer: Option<String>,
    pub correct_answer: String,
}

/// Pair questions with answers by position and keep the mismatches.
///
/// Missing answers (fewer answers than questions, or `None`) count as wrong.
#[must_use]
pub fn find_mistakes(questions: &[QuizQuestion], answers: &[Option<usize>]) -> Vec<Mistake> {
    questions
        .iter()
        .enumerate()
        .filter_map(|(i, q)| {
            let answer = answers.get(i).copied().flatten();
            if q.is_correct(answer) {
                return None;
            }
            Some(Mistake {
                question: q.question().to_owned(),
                user_answer: answer.and_then(|a| q.option(a)).map(str::to_owned),
                correct_answer: q.correct_option().to_owned(),
            })
        })
        .collect()
}

/// Leading slice of `text` holding at most `max_chars` characters.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
