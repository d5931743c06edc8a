use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("email is not valid")]
    InvalidEmail,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("correct answers ({correct}) cannot exceed questions answered ({answered})")]
    CorrectExceedsAnswered { answered: u32, correct: u32 },
}

/// Trim and lower-case an email address, rejecting obviously invalid input.
///
/// # Errors
///
/// Returns `UserError::InvalidEmail` if the address is blank or has no `@`
/// separating a non-empty local part and domain.
pub fn normalize_email(raw: &str) -> Result<String, UserError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(UserError::InvalidEmail),
    }
}

//
// ─── QUIZ RESULT / PROGRESS ────────────────────────────────────────────────────
//

/// Counters submitted after a single quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    questions_answered: u32,
    correct_answers: u32,
}

impl QuizResult {
    /// # Errors
    ///
    /// Returns `UserError::CorrectExceedsAnswered` if more answers are correct
    /// than were given.
    pub fn new(questions_answered: u32, correct_answers: u32) -> Result<Self, UserError> {
        if correct_answers > questions_answered {
            return Err(UserError::CorrectExceedsAnswered {
                answered: questions_answered,
                correct: correct_answers,
            });
        }
        Ok(Self {
            questions_answered,
            correct_answers,
        })
    }

    #[must_use]
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }
}

/// Cumulative quiz counters of one user for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizProgress {
    pub course_id: CourseId,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub last_quiz_date: DateTime<Utc>,
}

impl QuizProgress {
    #[must_use]
    pub fn first(course_id: CourseId, result: QuizResult, at: DateTime<Utc>) -> Self {
        Self {
            course_id,
            questions_answered: result.questions_answered,
            correct_answers: result.correct_answers,
            last_quiz_date: at,
        }
    }

    /// Add a new attempt to the running totals.
    pub fn absorb(&mut self, result: QuizResult, at: DateTime<Utc>) {
        self.questions_answered = self
            .questions_answered
            .saturating_add(result.questions_answered);
        self.correct_answers = self.correct_answers.saturating_add(result.correct_answers);
        self.last_quiz_date = at;
    }
}

//
// ─── USER ──────────────────────────────────────────────────────────────────────
//

/// A validated user that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// # Errors
    ///
    /// Returns `UserError` if the name is blank or the email is invalid.
    pub fn new(
        name: &str,
        email: &str,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            email: normalize_email(email)?,
            password_hash,
            created_at,
        })
    }

    #[must_use]
    pub fn assign_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            quiz_progress: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub quiz_progress: Vec<QuizProgress>,
}

impl User {
    #[must_use]
    pub fn progress_for(&self, course_id: CourseId) -> Option<&QuizProgress> {
        self.quiz_progress.iter().find(|p| p.course_id == course_id)
    }

    /// Merge a quiz attempt into the record for `course_id`, creating the
    /// record on the first attempt.
    pub fn record_quiz(
        &mut self,
        course_id: CourseId,
        result: QuizResult,
        at: DateTime<Utc>,
    ) -> &QuizProgress {
        let idx = match self
            .quiz_progress
            .iter()
            .position(|p| p.course_id == course_id)
        {
            Some(idx) => {
                self.quiz_progress[idx].absorb(result, at);
                idx
            }
            None => {
                self.quiz_progress
                    .push(QuizProgress::first(course_id, result, at));
                self.quiz_progress.len() - 1
            }
        };
        &self.quiz_progress[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn user() -> User {
        NewUser::new("Ada", "Ada@Example.com ", "hash".into(), fixed_now())
            .unwrap()
            .assign_id(UserId::new(1))
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(user().email, "ada@example.com");
        assert_eq!(normalize_email("nope"), Err(UserError::InvalidEmail));
        assert_eq!(normalize_email("@x"), Err(UserError::InvalidEmail));
    }

    #[test]
    fn first_attempt_creates_record_with_submitted_values() {
        let mut u = user();
        let p = u.record_quiz(CourseId::new(9), QuizResult::new(5, 4).unwrap(), fixed_now());
        assert_eq!((p.questions_answered, p.correct_answers), (5, 4));
        assert_eq!(u.quiz_progress.len(), 1);
    }

    #[test]
    fn later_attempts_accumulate_and_restamp() {
        let mut u = user();
        let course = CourseId::new(9);
        u.record_quiz(course, QuizResult::new(5, 4).unwrap(), fixed_now());
        let later = fixed_now() + Duration::hours(1);
        let p = u.record_quiz(course, QuizResult::new(3, 2).unwrap(), later);
        assert_eq!((p.questions_answered, p.correct_answers), (8, 6));
        assert_eq!(p.last_quiz_date, later);
        assert_eq!(u.quiz_progress.len(), 1);
    }

    #[test]
    fn records_are_kept_per_course() {
        let mut u = user();
        u.record_quiz(CourseId::new(1), QuizResult::new(2, 1).unwrap(), fixed_now());
        u.record_quiz(CourseId::new(2), QuizResult::new(4, 4).unwrap(), fixed_now());
        assert_eq!(u.progress_for(CourseId::new(1)).unwrap().correct_answers, 1);
        assert_eq!(u.progress_for(CourseId::new(2)).unwrap().correct_answers, 4);
        assert!(u.progress_for(CourseId::new(3)).is_none());
    }

    #[test]
    fn quiz_result_rejects_more_correct_than_answered() {
        assert!(QuizResult::new(2, 3).is_err());
    }
}
