use course_core::model::{NewUser, QuizProgress, User, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{
    conn, course_id_to_i64, map_progress_row, ser, user_id_from_i64, user_id_to_i64,
};
use crate::repository::{StorageError, UserRepository};

impl SqliteRepository {
    async fn load_progress(&self, user_id: i64) -> Result<Vec<QuizProgress>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT course_id, questions_answered, correct_answers, last_quiz_date
            FROM quiz_progress
            WHERE user_id = ?1
            ORDER BY rowid ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_progress_row).collect()
    }

    async fn hydrate_user(&self, row: &SqliteRow) -> Result<User, StorageError> {
        let raw_id: i64 = row.try_get("id").map_err(ser)?;
        Ok(User {
            id: user_id_from_i64(raw_id)?,
            name: row.try_get("name").map_err(ser)?,
            email: row.try_get("email").map_err(ser)?,
            password_hash: row.try_get("password_hash").map_err(ser)?,
            created_at: row.try_get("created_at").map_err(ser)?,
            quiz_progress: self.load_progress(raw_id).await?,
        })
    }
}

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, user: NewUser) -> Result<User, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            other => conn(other),
        })?;

        let id = user_id_from_i64(res.last_insert_rowid())?;
        Ok(user.assign_id(id))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, password_hash, created_at
            FROM users WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match row {
            Some(row) => self.hydrate_user(&row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, password_hash, created_at
            FROM users WHERE id = ?1
            ",
        )
        .bind(user_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match row {
            Some(row) => self.hydrate_user(&row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn save_progress(
        &self,
        user_id: UserId,
        progress: &QuizProgress,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO quiz_progress (user_id, course_id, questions_answered, correct_answers, last_quiz_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id, course_id) DO UPDATE SET
                questions_answered = excluded.questions_answered,
                correct_answers = excluded.correct_answers,
                last_quiz_date = excluded.last_quiz_date
            ",
        )
        .bind(user_id_to_i64(user_id)?)
        .bind(course_id_to_i64(progress.course_id)?)
        .bind(i64::from(progress.questions_answered))
        .bind(i64::from(progress.correct_answers))
        .bind(progress.last_quiz_date)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::NotFound,
            other => conn(other),
        })?;

        Ok(())
    }
}
