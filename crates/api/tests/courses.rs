use crate::common::{create_course, quiz_json, register_user, spawn_app};

mod common;

#[tokio::test]
async fn create_course_generates_quiz_and_summary() {
    let app = spawn_app().await;
    let course = create_course(&app, "Biology", "Cells divide by mitosis.").await;

    assert!(course["_id"].is_u64());
    assert_eq!(course["title"], "Biology");
    assert_eq!(course["content"], "Cells divide by mitosis.");
    assert_eq!(course["summary"], "## Summary");
    assert_eq!(course["quiz"].as_array().unwrap().len(), 3);
    assert_eq!(course["quiz"][0]["correctAnswerIndex"], 0);
    assert!(course.get("createdAt").is_some());

    let response = app
        .api_client
        .get(format!("{}/api/courses/{}", app.address, course["_id"]))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let fetched: serde_json::Value = response.json().await.unwrap();
    assert_eq!(fetched, course);
}

#[tokio::test]
async fn create_course_accepts_a_json_body() {
    let app = spawn_app().await;
    app.generator.push(quiz_json("J", 3));
    app.generator.push("json summary");

    let response = app
        .api_client
        .post(format!("{}/api/courses", app.address))
        .json(&serde_json::json!({ "title": "T", "content": "Body" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());

    let course: serde_json::Value = response.json().await.unwrap();
    assert_eq!(course["title"], "T");
    assert_eq!(course["content"], "Body");
    assert_eq!(course["summary"], "json summary");
    assert_eq!(course["quiz"].as_array().unwrap().len(), 3);

    let response = app
        .api_client
        .post(format!("{}/api/courses", app.address))
        .json(&serde_json::json!({ "title": "No body" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn create_course_without_content_or_files_is_rejected() {
    let app = spawn_app().await;

    let form = reqwest::multipart::Form::new().text("title", "Nothing");
    let response = app
        .api_client
        .post(format!("{}/api/courses", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    assert_eq!(app.generator.calls(), 0);
}

#[tokio::test]
async fn create_course_from_uploaded_files() {
    let app = spawn_app().await;
    app.generator.push(quiz_json("F", 3));
    app.generator.push("files summary");

    let form = reqwest::multipart::Form::new()
        .text("title", "Docs")
        .part(
            "files",
            reqwest::multipart::Part::bytes(b"chapter one".to_vec()).file_name("one.pdf"),
        )
        .part(
            "files",
            reqwest::multipart::Part::bytes(b"chapter two".to_vec()).file_name("two.pdf"),
        );
    let response = app
        .api_client
        .post(format!("{}/api/courses", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());

    let course: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        course["content"],
        "\n\n--- File: one.pdf ---\n\nchapter one\n\n--- File: two.pdf ---\n\nchapter two"
    );
}

#[tokio::test]
async fn missing_courses_are_not_found() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .delete(format!("{}/api/courses/424242", app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(404, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Course not found");

    let response = app
        .api_client
        .post(format!("{}/api/courses/424242/quiz/ensure", app.address))
        .json(&serde_json::json!({ "count": 5 }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn update_list_and_delete() {
    let app = spawn_app().await;
    let first = create_course(&app, "First", "one").await;
    let second = create_course(&app, "Second", "two").await;

    let response = app
        .api_client
        .put(format!("{}/api/courses/{}", app.address, first["_id"]))
        .json(&serde_json::json!({ "title": "First, revised" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["title"], "First, revised");
    assert_eq!(updated["content"], "one");

    let response = app
        .api_client
        .put(format!("{}/api/courses/{}", app.address, first["_id"]))
        .json(&serde_json::json!({ "content": "   " }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());

    let response = app
        .api_client
        .delete(format!("{}/api/courses/{}", app.address, second["_id"]))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["message"], "Course deleted successfully");

    let listed: serde_json::Value = app
        .api_client
        .get(format!("{}/api/courses", app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .unwrap();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], first["_id"]);
}

#[tokio::test]
async fn ensure_quiz_count_appends_only_the_deficit() {
    let app = spawn_app().await;
    let course = create_course(&app, "Chemistry", "Atoms bond.").await;
    let url = format!("{}/api/courses/{}/quiz/ensure", app.address, course["_id"]);

    app.generator.push(quiz_json("New", 2));
    let response = app
        .api_client
        .post(&url)
        .json(&serde_json::json!({ "count": 5 }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let extended: serde_json::Value = response.json().await.unwrap();
    let quiz = extended["quiz"].as_array().unwrap();
    assert_eq!(quiz.len(), 5);
    assert_eq!(quiz[..3], course["quiz"].as_array().unwrap()[..]);
    assert_eq!(quiz[3]["question"], "New1");

    let calls = app.generator.calls();
    let response = app
        .api_client
        .post(&url)
        .json(&serde_json::json!({ "count": 2 }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let unchanged: serde_json::Value = response.json().await.unwrap();
    assert_eq!(unchanged["quiz"], extended["quiz"]);
    assert_eq!(app.generator.calls(), calls);

    app.generator.push(quiz_json("Str", 1));
    let response = app
        .api_client
        .post(&url)
        .json(&serde_json::json!({ "count": "6" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let from_string: serde_json::Value = response.json().await.unwrap();
    assert_eq!(from_string["quiz"].as_array().unwrap().len(), 6);
    assert_eq!(from_string["quiz"][5]["question"], "Str1");

    let response = app
        .api_client
        .post(&url)
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn restyle_summary_validates_style() {
    let app = spawn_app().await;
    let course = create_course(&app, "History", "Rome was not built in a day.").await;
    let url = format!("{}/api/courses/{}/summary", app.address, course["_id"]);

    let response = app
        .api_client
        .put(&url)
        .json(&serde_json::json!({ "style": "haiku" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());

    app.generator.push("```markdown\n## 🎯 Rome\n```");
    let response = app
        .api_client
        .put(&url)
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let restyled: serde_json::Value = response.json().await.unwrap();
    assert_eq!(restyled["summary"], "## 🎯 Rome");
    assert!(app.generator.prompts().last().unwrap().contains("cheat sheet"));
}

#[tokio::test]
async fn submitted_results_accumulate_per_user_and_course() {
    let app = spawn_app().await;
    let token = register_user(&app, "learner@example.com").await;
    let course = create_course(&app, "Physics", "F = ma").await;
    let url = format!("{}/api/courses/{}/quiz/submit", app.address, course["_id"]);

    for (answered, correct) in [(5, 4), (3, 2)] {
        let response = app
            .api_client
            .post(&url)
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "questionsAnswered": answered,
                "correctAnswers": correct
            }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(200, response.status().as_u16());
    }

    let response = app
        .api_client
        .get(format!("{}/api/auth/progress/{}", app.address, course["_id"]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request.");
    let progress: serde_json::Value = response.json().await.unwrap();
    assert_eq!(progress["questionsAnswered"], 8);
    assert_eq!(progress["correctAnswers"], 6);
    assert!(progress["lastQuizDate"].is_string());

    let response = app
        .api_client
        .post(&url)
        .bearer_auth(&token)
        .json(&serde_json::json!({ "questionsAnswered": 1, "correctAnswers": 2 }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn review_with_no_mistakes_skips_the_ai() {
    let app = spawn_app().await;
    let course = create_course(&app, "Maths", "2 + 2 = 4").await;
    let url = format!("{}/api/courses/{}/quiz/review", app.address, course["_id"]);

    let calls = app.generator.calls();
    let response = app
        .api_client
        .post(&url)
        .json(&serde_json::json!({
            "questions": course["quiz"],
            "userAnswers": [0, 0, 0]
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["explanation"], services::NO_MISTAKES_MESSAGE);
    assert_eq!(app.generator.calls(), calls);

    app.generator.push("Look again at question 2.");
    let response = app
        .api_client
        .post(&url)
        .json(&serde_json::json!({
            "questions": course["quiz"],
            "userAnswers": [0, 3, null]
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["explanation"], "Look again at question 2.");
    assert!(app.generator.prompts().last().unwrap().contains("(no answer)"));
}
