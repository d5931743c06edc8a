use async_trait::async_trait;
use course_core::model::{Course, CourseId, NewCourse, NewUser, QuizProgress, User, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for courses.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn insert_course(&self, course: NewCourse) -> Result<Course, StorageError>;

    /// Fetch a course by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing course is `Ok(None)`.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// All courses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// Overwrite title, content, quiz and summary of an existing course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course does not exist.
    async fn update_course(&self, course: &Course) -> Result<(), StorageError>;

    /// Delete a course. Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn delete_course(&self, id: CourseId) -> Result<bool, StorageError>;
}

/// Repository contract for users and their quiz progress.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_user(&self, user: NewUser) -> Result<User, StorageError>;

    /// Look a user up by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Fetch a user, including all progress records.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// Insert or overwrite the progress record for `(user_id, progress.course_id)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist.
    async fn save_progress(
        &self,
        user_id: UserId,
        progress: &QuizProgress,
    ) -> Result<(), StorageError>;
}

/// Newest first, highest id first on equal timestamps.
pub(crate) fn sort_newest_first(courses: &mut [Course]) {
    courses.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    next_id: Arc<AtomicU64>,
    courses: Arc<Mutex<HashMap<CourseId, Course>>>,
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(0)),
            courses: Arc::new(Mutex::new(HashMap::new())),
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn insert_course(&self, course: NewCourse) -> Result<Course, StorageError> {
        let id = CourseId::new(self.allocate_id());
        let course = course.assign_id(id);
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id, course.clone());
        Ok(course)
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut courses: Vec<Course> = guard.values().cloned().collect();
        sort_newest_first(&mut courses);
        Ok(courses)
    }

    async fn update_course(&self, course: &Course) -> Result<(), StorageError> {
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.get_mut(&course.id()) {
            Some(slot) => {
                *slot = course.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, StorageError> {
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.values().any(|u| u.email == user.email) {
            return Err(StorageError::Conflict);
        }
        let user = user.assign_id(UserId::new(self.allocate_id()));
        guard.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().find(|u| u.email == email).cloned())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn save_progress(
        &self,
        user_id: UserId,
        progress: &QuizProgress,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let user = guard.get_mut(&user_id).ok_or(StorageError::NotFound)?;
        match user
            .quiz_progress
            .iter_mut()
            .find(|p| p.course_id == progress.course_id)
        {
            Some(existing) => *existing = progress.clone(),
            None => user.quiz_progress.push(progress.clone()),
        }
        Ok(())
    }
}

/// Aggregates course and user repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let courses: Arc<dyn CourseRepository> = Arc::new(repo.clone());
        let users: Arc<dyn UserRepository> = Arc::new(repo);
        Self { courses, users }
    }
}
