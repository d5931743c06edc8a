mod course;
mod ids;
pub mod mistakes;
mod quiz;
mod summary;
mod user;

pub use course::{Course, CourseError, NewCourse};
pub use ids::{CourseId, ParseIdError, UserId};
pub use mistakes::{EXPLANATION_CONTEXT_CHARS, Mistake, excerpt, find_mistakes};
pub use quiz::{OPTIONS_PER_QUESTION, QuizError, QuizQuestion, QuizQuestionDraft};
pub use summary::{SummaryStyle, UnknownStyle};
pub use user::{NewUser, QuizProgress, QuizResult, User, UserError, normalize_email};
