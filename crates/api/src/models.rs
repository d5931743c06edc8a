//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use course_core::model::{Course, CourseId, QuizProgress, QuizQuestion, User, UserId};
use services::NewCourseRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

//
// ─── AUTH ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    #[must_use]
    pub fn new(user: &User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            token,
        }
    }
}

//
// ─── COURSES ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[serde(rename = "_id")]
    pub id: CourseId,
    pub title: String,
    pub content: String,
    pub quiz: Vec<QuizQuestion>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id(),
            title: course.title().to_owned(),
            content: course.content().to_owned(),
            quiz: course.quiz().to_vec(),
            summary: course.summary().map(str::to_owned),
            created_at: course.created_at(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryStyleRequest {
    pub style: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    pub content: Option<String>,
}

impl From<CreateCourseRequest> for NewCourseRequest {
    fn from(req: CreateCourseRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            files: Vec::new(),
        }
    }
}

/// Browser forms often send numbers as strings; both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CountValue {
    /// Non-numeric or negative values map to 0, which the service rejects.
    pub fn to_count(&self) -> usize {
        let n = match self {
            CountValue::Int(n) => *n,
            CountValue::Float(f) if f.is_finite() => f.trunc() as i64,
            CountValue::Float(_) => 0,
            CountValue::Text(raw) => raw.trim().parse().unwrap_or(0),
        };
        usize::try_from(n).unwrap_or(0)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EnsureQuizRequest {
    pub count: Option<CountValue>,
}

impl EnsureQuizRequest {
    pub fn count(&self) -> usize {
        self.count.as_ref().map_or(0, CountValue::to_count)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub questions_answered: u32,
    pub correct_answers: u32,
}

#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    pub success: bool,
    pub progress: Vec<QuizProgress>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuizRequest {
    pub questions: Vec<QuizQuestion>,
    /// Chosen option per question; `null` (or a negative index) means unanswered.
    #[serde(default)]
    pub user_answers: Vec<Option<i64>>,
}

impl ReviewQuizRequest {
    #[must_use]
    pub fn answers(&self) -> Vec<Option<usize>> {
        self.user_answers
            .iter()
            .map(|a| a.and_then(|i| usize::try_from(i).ok()))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewQuizResponse {
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use course_core::time::fixed_now;
    use course_core::model::NewCourse;

    #[test]
    fn course_serializes_with_underscore_id_and_camel_case() {
        let course = NewCourse::new("T", "C", vec![], None, fixed_now())
            .unwrap()
            .assign_id(CourseId::new(4));
        let json = serde_json::to_value(CourseResponse::from(course)).unwrap();
        assert_eq!(json["_id"], 4);
        assert_eq!(json["quiz"], serde_json::json!([]));
        assert!(json["summary"].is_null());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn negative_and_null_answers_are_unanswered() {
        let req: ReviewQuizRequest =
            serde_json::from_str(r#"{"questions":[],"userAnswers":[1,null,-1]}"#).unwrap();
        assert_eq!(req.answers(), vec![Some(1), None, None]);
    }

    #[test]
    fn ensure_count_accepts_numbers_and_numeric_strings() {
        let count = |body: &str| {
            serde_json::from_str::<EnsureQuizRequest>(body)
                .unwrap()
                .count()
        };
        assert_eq!(count(r#"{"count":3}"#), 3);
        assert_eq!(count(r#"{"count":"3"}"#), 3);
        assert_eq!(count(r#"{"count":" 7 "}"#), 7);
        assert_eq!(count(r#"{"count":4.9}"#), 4);
        assert_eq!(count(r#"{"count":"three"}"#), 0);
        assert_eq!(count(r#"{"count":-2}"#), 0);
        assert_eq!(count(r#"{"count":null}"#), 0);
        assert_eq!(count("{}"), 0);
    }

    #[test]
    fn json_course_body_has_no_files() {
        let req: CreateCourseRequest =
            serde_json::from_str(r#"{"title":"T","content":"Body"}"#).unwrap();
        let new = NewCourseRequest::from(req);
        assert_eq!(new.title, "T");
        assert_eq!(new.content.as_deref(), Some("Body"));
        assert!(new.files.is_empty());
    }
}
