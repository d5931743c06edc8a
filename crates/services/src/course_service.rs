use std::sync::Arc;

use course_core::model::{Course, CourseId, NewCourse, QuizQuestion, SummaryStyle, find_mistakes};
use storage::repository::{CourseRepository, StorageError};

use crate::Clock;
use crate::ai::CourseAi;
use crate::error::CourseServiceError;
use crate::extract::{TextExtractor, UploadedFile, compose_content};

/// Questions generated for a freshly created course.
pub const DEFAULT_QUIZ_SIZE: usize = 3;

/// Returned by [`CourseService::review_quiz`] when every answer was right.
pub const NO_MISTAKES_MESSAGE: &str = "Félicitations ! Vous n'avez fait aucune erreur. 🎉";

/// Input for [`CourseService::create_course`].
#[derive(Debug, Clone, Default)]
pub struct NewCourseRequest {
    pub title: String,
    pub content: Option<String>,
    /// Uploaded documents; when present their text replaces `content`.
    pub files: Vec<UploadedFile>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Course lifecycle plus the AI-backed quiz and summary operations.
#[derive(Clone)]
pub struct CourseService {
    clock: Clock,
    courses: Arc<dyn CourseRepository>,
    ai: CourseAi,
    extractor: Arc<dyn TextExtractor>,
}

impl CourseService {
    #[must_use]
    pub fn new(
        clock: Clock,
        courses: Arc<dyn CourseRepository>,
        ai: CourseAi,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            clock,
            courses,
            ai,
            extractor,
        }
    }

    /// Create a course from typed content or uploaded files, generating its
    /// quiz and summary before anything is stored.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::MissingContent` when neither usable content
    /// nor files were given, `Extract`/`TooManyFiles` for upload problems,
    /// `Ai` if generation fails and `Storage` if persistence fails.
    pub async fn create_course(&self, request: NewCourseRequest) -> Result<Course, CourseServiceError> {
        let content = if request.files.is_empty() {
            request.content.unwrap_or_default()
        } else {
            compose_content(&request.files, self.extractor.as_ref())?
        };
        if request.title.trim().is_empty() || content.trim().is_empty() {
            return Err(CourseServiceError::MissingContent);
        }

        let quiz = self.ai.generate_quiz(&content, DEFAULT_QUIZ_SIZE).await?;
        let summary = self.ai.generate_summary(&content).await?;

        let course = NewCourse::new(
            request.title,
            content,
            quiz,
            Some(summary),
            self.clock.now(),
        )?;
        let course = self.courses.insert_course(course).await?;
        log::info!(
            "created course {} with {} questions",
            course.id(),
            course.quiz().len()
        );
        Ok(course)
    }

    /// All courses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CourseServiceError> {
        Ok(self.courses.list_courses().await?)
    }

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) when the course is missing.
    pub async fn get_course(&self, id: CourseId) -> Result<Course, CourseServiceError> {
        let course = self
            .courses
            .get_course(id)
            .await?
            .ok_or(StorageError::NotFound)?;
        Ok(course)
    }

    /// # Errors
    ///
    /// Returns `CourseServiceError::Course` for blank values and
    /// `StorageError::NotFound` (wrapped) when the course is missing.
    pub async fn update_course(
        &self,
        id: CourseId,
        update: CourseUpdate,
    ) -> Result<Course, CourseServiceError> {
        let mut course = self.get_course(id).await?;
        if let Some(title) = update.title {
            course.rename(title)?;
        }
        if let Some(content) = update.content {
            course.replace_content(content)?;
        }
        self.courses.update_course(&course).await?;
        Ok(course)
    }

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) when nothing was deleted.
    pub async fn delete_course(&self, id: CourseId) -> Result<(), CourseServiceError> {
        if !self.courses.delete_course(id).await? {
            return Err(StorageError::NotFound.into());
        }
        log::info!("deleted course {id}");
        Ok(())
    }

    /// Regenerate the summary in the given style and store it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) when the course is missing and
    /// `CourseServiceError::Ai` if generation fails.
    pub async fn restyle_summary(
        &self,
        id: CourseId,
        style: SummaryStyle,
    ) -> Result<Course, CourseServiceError> {
        let mut course = self.get_course(id).await?;
        let summary = self
            .ai
            .generate_styled_summary(course.source_text(), style)
            .await?;
        course.set_summary(summary);
        self.courses.update_course(&course).await?;
        Ok(course)
    }

    /// Grow the quiz to at least `count` questions, keeping existing ones.
    ///
    /// Makes no AI call when the quiz is already long enough. Extra generated
    /// questions beyond the deficit are discarded.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::InvalidCount` for a zero count,
    /// `StorageError::NotFound` (wrapped) when the course is missing and
    /// `CourseServiceError::Ai` if generation fails.
    pub async fn ensure_quiz_count(
        &self,
        id: CourseId,
        count: usize,
    ) -> Result<Course, CourseServiceError> {
        if count == 0 {
            return Err(CourseServiceError::InvalidCount);
        }
        let mut course = self.get_course(id).await?;
        let deficit = course.quiz_deficit(count);
        if deficit == 0 {
            return Ok(course);
        }

        let generated = self.ai.generate_quiz(course.source_text(), deficit).await?;
        if generated.len() < deficit {
            log::warn!(
                "course {id}: asked for {deficit} questions, provider returned {}",
                generated.len()
            );
        }
        course.append_questions(generated.into_iter().take(deficit));
        self.courses.update_course(&course).await?;
        log::info!("course {id}: quiz now has {} questions", course.quiz().len());
        Ok(course)
    }

    /// Explain the wrong answers of a taken quiz.
    ///
    /// `answers` pair with `questions` by position; a missing entry or `None`
    /// counts as wrong.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) when the course is missing and
    /// `CourseServiceError::Ai` if generation fails.
    pub async fn review_quiz(
        &self,
        id: CourseId,
        questions: &[QuizQuestion],
        answers: &[Option<usize>],
    ) -> Result<String, CourseServiceError> {
        let course = self.get_course(id).await?;
        let mistakes = find_mistakes(questions, answers);
        if mistakes.is_empty() {
            return Ok(NO_MISTAKES_MESSAGE.to_owned());
        }
        let explanation = self
            .ai
            .explain_mistakes(&mistakes, course.content())
            .await?;
        Ok(explanation)
    }
}
