use course_core::model::{Course, CourseId, NewCourse};

use super::SqliteRepository;
use super::mapping::{conn, course_id_from_i64, course_id_to_i64, map_course_row, quiz_to_json};
use crate::repository::{CourseRepository, StorageError};

#[async_trait::async_trait]
impl CourseRepository for SqliteRepository {
    async fn insert_course(&self, course: NewCourse) -> Result<Course, StorageError> {
        let quiz = quiz_to_json(course.quiz())?;

        let res = sqlx::query(
            r"
            INSERT INTO courses (title, content, quiz, summary, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(course.title())
        .bind(course.content())
        .bind(quiz)
        .bind(course.summary())
        .bind(course.created_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        let id = course_id_from_i64(res.last_insert_rowid())?;
        Ok(course.assign_id(id))
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, title, content, quiz, summary, created_at
            FROM courses WHERE id = ?1
            ",
        )
        .bind(course_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_course_row).transpose()
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, content, quiz, summary, created_at
            FROM courses
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_course_row).collect()
    }

    async fn update_course(&self, course: &Course) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE courses
            SET title = ?2, content = ?3, quiz = ?4, summary = ?5
            WHERE id = ?1
            ",
        )
        .bind(course_id_to_i64(course.id())?)
        .bind(course.title())
        .bind(course.content())
        .bind(quiz_to_json(course.quiz())?)
        .bind(course.summary())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, StorageError> {
        let res = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(course_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }
}
