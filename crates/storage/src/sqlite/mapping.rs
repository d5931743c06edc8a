use course_core::model::{Course, CourseId, QuizProgress, QuizQuestion, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn course_id_from_i64(v: i64) -> Result<CourseId, StorageError> {
    Ok(CourseId::new(i64_to_u64("course_id", v)?))
}

pub(crate) fn course_id_to_i64(id: CourseId) -> Result<i64, StorageError> {
    u64_to_i64("course_id", id.value())
}

pub(crate) fn user_id_from_i64(v: i64) -> Result<UserId, StorageError> {
    Ok(UserId::new(i64_to_u64("user_id", v)?))
}

pub(crate) fn user_id_to_i64(id: UserId) -> Result<i64, StorageError> {
    u64_to_i64("user_id", id.value())
}

/// The quiz is stored as a JSON array in the wire shape used by the API.
pub(crate) fn quiz_to_json(quiz: &[QuizQuestion]) -> Result<String, StorageError> {
    serde_json::to_string(quiz).map_err(ser)
}

pub(crate) fn quiz_from_json(raw: &str) -> Result<Vec<QuizQuestion>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

fn counter(row: &SqliteRow, field: &'static str) -> Result<u32, StorageError> {
    let v: i64 = row.try_get(field).map_err(ser)?;
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_course_row(row: &SqliteRow) -> Result<Course, StorageError> {
    let quiz_raw: String = row.try_get("quiz").map_err(ser)?;
    Course::from_persisted(
        course_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("content").map_err(ser)?,
        quiz_from_json(&quiz_raw)?,
        row.try_get::<Option<String>, _>("summary").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<QuizProgress, StorageError> {
    Ok(QuizProgress {
        course_id: course_id_from_i64(row.try_get::<i64, _>("course_id").map_err(ser)?)?,
        questions_answered: counter(row, "questions_answered")?,
        correct_answers: counter(row, "correct_answers")?,
        last_quiz_date: row.try_get("last_quiz_date").map_err(ser)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_ids_are_rejected() {
        assert!(course_id_from_i64(-1).is_err());
        assert_eq!(user_id_from_i64(5).unwrap(), UserId::new(5));
    }

    #[test]
    fn invalid_quiz_json_is_a_serialization_error() {
        let err = quiz_from_json(r#"[{"question":"Q","options":[],"correctAnswerIndex":0}]"#)
            .unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        assert!(quiz_from_json("[]").unwrap().is_empty());
    }
}
