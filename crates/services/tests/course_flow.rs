use std::sync::Arc;

use course_core::model::{QuizQuestion, SummaryStyle};
use course_core::time::fixed_now;
use services::{
    AppServices, CannedGenerator, Clock, CourseUpdate, ExtractError, JwtConfig,
    NO_MISTAKES_MESSAGE, NewCourseRequest, ServiceDeps, TextExtractor, TextGenerator, UploadedFile,
};
use storage::repository::Storage;

struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}

fn quiz_json(prefix: &str, n: usize) -> String {
    let items: Vec<String> = (1..=n)
        .map(|i| {
            format!(
                r#"{{"question":"{prefix}{i}","options":["a","b","c","d"],"correctAnswerIndex":{}}}"#,
                i % 4
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn services(generator: &Arc<CannedGenerator>) -> AppServices {
    AppServices::from_storage(
        &Storage::in_memory(),
        Clock::fixed(fixed_now()),
        ServiceDeps {
            generator: Arc::clone(generator) as Arc<dyn TextGenerator>,
            extractor: Arc::new(PlainTextExtractor),
            language: "French".into(),
            jwt: JwtConfig::new("flow-secret"),
        },
    )
}

#[tokio::test]
async fn create_then_extend_quiz_keeps_existing_questions() {
    let generator = Arc::new(CannedGenerator::new([
        quiz_json("Q", 3),
        "## Summary".to_string(),
        // Provider over-delivers: only the deficit is kept.
        quiz_json("Extra", 4),
    ]));
    let app = services(&generator);
    let courses = app.courses();

    let course = courses
        .create_course(NewCourseRequest {
            title: "Cells".into(),
            content: Some("Cells divide by mitosis.".into()),
            files: vec![],
        })
        .await
        .expect("create course");
    assert_eq!(course.quiz().len(), 3);
    assert_eq!(course.summary(), Some("## Summary"));
    let original: Vec<QuizQuestion> = course.quiz().to_vec();

    let extended = courses
        .ensure_quiz_count(course.id(), 5)
        .await
        .expect("ensure quiz");
    assert_eq!(extended.quiz().len(), 5);
    assert_eq!(&extended.quiz()[..3], original.as_slice());
    assert_eq!(extended.quiz()[3].question(), "Extra1");
    assert_eq!(extended.quiz()[4].question(), "Extra2");
    assert!(generator.prompts()[2].contains("2 questions"));

    // Already long enough: no provider call, nothing changes.
    let calls = generator.calls();
    let same = courses.ensure_quiz_count(course.id(), 4).await.unwrap();
    assert_eq!(same.quiz(), extended.quiz());
    assert_eq!(generator.calls(), calls);

    let stored = courses.get_course(course.id()).await.unwrap();
    assert_eq!(stored.quiz().len(), 5);
}

#[tokio::test]
async fn uploaded_files_replace_typed_content() {
    let generator = Arc::new(CannedGenerator::new([quiz_json("Q", 3), "sum".into()]));
    let app = services(&generator);

    let course = app
        .courses()
        .create_course(NewCourseRequest {
            title: "Docs".into(),
            content: Some("typed".into()),
            files: vec![
                UploadedFile::new("one.pdf", b"first doc".to_vec()),
                UploadedFile::new("two.pdf", b"second doc".to_vec()),
            ],
        })
        .await
        .unwrap();
    assert_eq!(
        course.content(),
        "\n\n--- File: one.pdf ---\n\nfirst doc\n\n--- File: two.pdf ---\n\nsecond doc"
    );
    assert!(generator.prompts()[0].contains("first doc"));
}

#[tokio::test]
async fn restyle_update_and_review() {
    let generator = Arc::new(CannedGenerator::new([
        quiz_json("Q", 3),
        "long summary".into(),
        "```markdown\n# Tiny\n```".into(),
        "You mixed up b and c.".into(),
    ]));
    let app = services(&generator);
    let courses = app.courses();
    let course = courses
        .create_course(NewCourseRequest {
            title: "Algebra".into(),
            content: Some("x + 1 = 2".into()),
            files: vec![],
        })
        .await
        .unwrap();

    let restyled = courses
        .restyle_summary(course.id(), SummaryStyle::Shrink)
        .await
        .unwrap();
    assert_eq!(restyled.summary(), Some("# Tiny"));
    assert!(generator.prompts()[2].contains("70% SHORTER"));

    let updated = courses
        .update_course(
            course.id(),
            CourseUpdate {
                title: Some("Algebra I".into()),
                content: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title(), "Algebra I");
    assert_eq!(updated.content(), "x + 1 = 2");
    assert_eq!(updated.summary(), Some("# Tiny"));

    let quiz = updated.quiz().to_vec();
    let all_right: Vec<Option<usize>> =
        quiz.iter().map(|q| Some(q.correct_answer_index())).collect();
    let calls = generator.calls();
    let praise = courses
        .review_quiz(course.id(), &quiz, &all_right)
        .await
        .unwrap();
    assert_eq!(praise, NO_MISTAKES_MESSAGE);
    assert_eq!(generator.calls(), calls);

    let one_wrong = vec![Some(quiz[0].correct_answer_index()), None];
    let explanation = courses
        .review_quiz(course.id(), &quiz, &one_wrong)
        .await
        .unwrap();
    assert_eq!(explanation, "You mixed up b and c.");
    let prompt = generator.prompts().pop().unwrap();
    assert!(prompt.contains("Question 1: Q2"));
    assert!(prompt.contains("Question 2: Q3"));
    assert!(prompt.contains("x + 1 = 2"));

    courses.delete_course(course.id()).await.unwrap();
    assert!(courses.list_courses().await.unwrap().is_empty());
}
