use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use course_core::model::{CourseId, QuizProgress, QuizResult, UserId};
use storage::repository::{StorageError, UserRepository};

use crate::Clock;
use crate::error::ProgressServiceError;

/// Progress on one course, zeroed when the user never took its quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub last_quiz_date: Option<DateTime<Utc>>,
}

impl From<&QuizProgress> for ProgressSnapshot {
    fn from(p: &QuizProgress) -> Self {
        Self {
            questions_answered: p.questions_answered,
            correct_answers: p.correct_answers,
            last_quiz_date: Some(p.last_quiz_date),
        }
    }
}

/// Accumulates quiz attempts into per-user, per-course totals.
///
/// Each submission is a read-merge-write against the store; two concurrent
/// submissions for the same user and course race and the last write wins.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// Add one attempt to the user's totals for `course_id` and return the
    /// user's whole progress list.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::User` when `correct_answers` exceeds
    /// `questions_answered` and `StorageError::NotFound` (wrapped) for an
    /// unknown user.
    pub async fn submit_quiz_result(
        &self,
        user_id: UserId,
        course_id: CourseId,
        questions_answered: u32,
        correct_answers: u32,
    ) -> Result<Vec<QuizProgress>, ProgressServiceError> {
        let result = QuizResult::new(questions_answered, correct_answers)?;
        let mut user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let merged = user
            .record_quiz(course_id, result, self.clock.now())
            .clone();
        self.users.save_progress(user_id, &merged).await?;
        log::info!(
            "user {user_id} course {course_id}: {}/{} correct overall",
            merged.correct_answers,
            merged.questions_answered
        );
        Ok(user.quiz_progress)
    }

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) for an unknown user.
    pub async fn progress_for(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<ProgressSnapshot, ProgressServiceError> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        Ok(user
            .progress_for(course_id)
            .map(ProgressSnapshot::from)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use course_core::model::{NewUser, UserError};
    use course_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    async fn seeded() -> (InMemoryRepository, UserId) {
        let repo = InMemoryRepository::new();
        let user = repo
            .insert_user(NewUser::new("Ada", "ada@example.com", "hash".into(), fixed_now()).unwrap())
            .await
            .unwrap();
        (repo, user.id)
    }

    #[tokio::test]
    async fn attempts_accumulate_and_restamp() {
        let (repo, user_id) = seeded().await;
        let course = CourseId::new(3);

        let first = ProgressService::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()));
        let progress = first.submit_quiz_result(user_id, course, 5, 4).await.unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].questions_answered, 5);
        assert_eq!(progress[0].correct_answers, 4);

        let later = fixed_now() + Duration::hours(2);
        let second = ProgressService::new(Clock::fixed(later), Arc::new(repo));
        second.submit_quiz_result(user_id, course, 3, 2).await.unwrap();

        let snapshot = second.progress_for(user_id, course).await.unwrap();
        assert_eq!(
            snapshot,
            ProgressSnapshot {
                questions_answered: 8,
                correct_answers: 6,
                last_quiz_date: Some(later),
            }
        );
    }

    #[tokio::test]
    async fn untouched_course_reads_as_zero() {
        let (repo, user_id) = seeded().await;
        let svc = ProgressService::new(Clock::fixed(fixed_now()), Arc::new(repo));
        assert_eq!(
            svc.progress_for(user_id, CourseId::new(1)).await.unwrap(),
            ProgressSnapshot::default()
        );
    }

    #[tokio::test]
    async fn impossible_scores_and_unknown_users_fail() {
        let (repo, user_id) = seeded().await;
        let svc = ProgressService::new(Clock::fixed(fixed_now()), Arc::new(repo));
        assert!(matches!(
            svc.submit_quiz_result(user_id, CourseId::new(1), 2, 3).await,
            Err(ProgressServiceError::User(UserError::CorrectExceedsAnswered { .. }))
        ));
        assert!(matches!(
            svc.submit_quiz_result(UserId::new(404), CourseId::new(1), 2, 1).await,
            Err(ProgressServiceError::Storage(StorageError::NotFound))
        ));
    }
}
