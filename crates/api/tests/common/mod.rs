use std::net::TcpListener;
use std::sync::Arc;

use api::{CorsConfig, run};
use services::{
    AppServices, CannedGenerator, Clock, ExtractError, JwtConfig, ServiceDeps, TextExtractor,
};
use storage::repository::Storage;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub generator: Arc<CannedGenerator>,
}

/// Uploads in tests are plain UTF-8 text standing in for PDFs.
struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}

pub async fn spawn_app() -> TestApp {
    let generator = Arc::new(CannedGenerator::default());
    let services = AppServices::from_storage(
        &Storage::in_memory(),
        Clock::default_clock(),
        ServiceDeps {
            generator: Arc::clone(&generator) as Arc<dyn services::TextGenerator>,
            extractor: Arc::new(PlainTextExtractor),
            language: "French".into(),
            jwt: JwtConfig::new("api-test-secret"),
        },
    );

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{port}");

    let server =
        run(listener, services, CorsConfig::permissive()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        api_client: reqwest::Client::new(),
        generator,
    }
}

#[allow(dead_code)]
pub fn quiz_json(prefix: &str, n: usize) -> String {
    let items: Vec<String> = (1..=n)
        .map(|i| {
            format!(
                r#"{{"question":"{prefix}{i}","options":["a","b","c","d"],"correctAnswerIndex":0}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

/// Register a fresh user and return its bearer token.
#[allow(dead_code)]
pub async fn register_user(app: &TestApp, email: &str) -> String {
    let response = app
        .api_client
        .post(format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({
            "name": "Test User",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());

    let json: serde_json::Value = response.json().await.expect("Failed to read JSON");
    json["token"].as_str().unwrap().to_string()
}

/// Create a course from typed content; queues a three-question quiz and a summary.
#[allow(dead_code)]
pub async fn create_course(app: &TestApp, title: &str, content: &str) -> serde_json::Value {
    app.generator.push(quiz_json("Q", 3));
    app.generator.push("## Summary");

    let form = reqwest::multipart::Form::new()
        .text("title", title.to_string())
        .text("content", content.to_string());
    let response = app
        .api_client
        .post(format!("{}/api/courses", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());
    response.json().await.expect("Failed to read JSON")
}
