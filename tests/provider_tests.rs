//! Adapters exercised against a local stand-in for the vendor endpoint.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

use tableside::errors::MediationError;
use tableside::models::{Sentiment, Turn};
use tableside::services::ai::booking::continue_booking_conversation;
use tableside::services::ai::gemini::GeminiProvider;
use tableside::services::ai::groq::GroqProvider;
use tableside::services::ai::ollama::OllamaProvider;
use tableside::services::ai::owner::{answer_owner_query, OWNER_QUERY_FALLBACK};
use tableside::services::ai::review::analyze_review;

struct Seen {
    path: String,
    headers: HeaderMap,
    body: serde_json::Value,
}

struct FakeVendor {
    status: StatusCode,
    body: String,
    delay: Duration,
    seen: Mutex<Vec<Seen>>,
}

async fn respond(
    State(fake): State<Arc<FakeVendor>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    fake.seen.lock().unwrap().push(Seen {
        path: uri.path().to_string(),
        headers,
        body: serde_json::from_str(&body).unwrap_or_default(),
    });
    if !fake.delay.is_zero() {
        tokio::time::sleep(fake.delay).await;
    }
    (
        fake.status,
        [("content-type", "application/json")],
        fake.body.clone(),
    )
        .into_response()
}

async fn spawn_vendor(
    status: StatusCode,
    body: &str,
    delay: Duration,
) -> (String, Arc<FakeVendor>) {
    let fake = Arc::new(FakeVendor {
        status,
        body: body.to_string(),
        delay,
        seen: Mutex::new(vec![]),
    });
    let app = Router::new()
        .fallback(respond)
        .with_state(Arc::clone(&fake));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), fake)
}

fn gemini(base_url: String, timeout: Duration) -> GeminiProvider {
    GeminiProvider::new(
        "test-key".to_string(),
        "test-model".to_string(),
        base_url,
        timeout,
    )
}

fn gemini_text(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

// ── Gemini ──

#[tokio::test]
async fn test_gemini_review_analysis() {
    let body = gemini_text(
        r#"{"sentiment":"Neutral","draft":"Thank you, we'll work on the wait times."}"#,
    );
    let (url, fake) = spawn_vendor(StatusCode::OK, &body, Duration::ZERO).await;
    let provider = gemini(url, Duration::from_secs(5));

    let analysis = analyze_review(&provider, "Terrible wait, but the food was fine.")
        .await
        .unwrap();
    assert_eq!(analysis.sentiment, Sentiment::Neutral);
    assert!(!analysis.draft.is_empty());

    let seen = fake.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/v1beta/models/test-model:generateContent");
    assert_eq!(seen[0].headers["x-goog-api-key"], "test-key");
    let config = &seen[0].body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["required"], serde_json::json!(["sentiment", "draft"]));
}

#[tokio::test]
async fn test_gemini_booking_sends_directive_and_history() {
    let body = gemini_text(
        r#"{"reply":"How many guests?","intent":{"guestName":"Ana","isComplete":false}}"#,
    );
    let (url, fake) = spawn_vendor(StatusCode::OK, &body, Duration::ZERO).await;
    let provider = gemini(url, Duration::from_secs(5));

    let history = vec![Turn::user("Table please"), Turn::assistant("Your name?")];
    let reply = continue_booking_conversation(&provider, "The Gilded Plate", "Ana", &history)
        .await
        .unwrap();
    assert_eq!(reply.intent.guest_name.as_deref(), Some("Ana"));

    let seen = fake.seen.lock().unwrap();
    let contents = seen[0].body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["parts"][0]["text"], "Ana");
    assert!(seen[0].body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("The Gilded Plate"));
}

#[tokio::test]
async fn test_gemini_rate_limit_is_unavailable() {
    let (url, _) = spawn_vendor(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#,
        Duration::ZERO,
    )
    .await;
    let provider = gemini(url, Duration::from_secs(5));

    let err = analyze_review(&provider, "Great food").await.unwrap_err();
    assert!(matches!(err, MediationError::ServiceUnavailable(ref m) if m.contains("rate limited")));
}

#[tokio::test]
async fn test_gemini_server_error_is_unavailable() {
    let (url, _) = spawn_vendor(StatusCode::INTERNAL_SERVER_ERROR, "{}", Duration::ZERO).await;
    let provider = gemini(url, Duration::from_secs(5));

    let err = answer_owner_query(&provider, "The Gilded Plate", "Tonight?", &[])
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_gemini_timeout_is_unavailable() {
    let (url, _) = spawn_vendor(StatusCode::OK, &gemini_text("late"), Duration::from_secs(2)).await;
    let provider = gemini(url, Duration::from_millis(200));

    let err = answer_owner_query(&provider, "The Gilded Plate", "Tonight?", &[])
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let provider = gemini(format!("http://{addr}"), Duration::from_secs(2));

    let err = analyze_review(&provider, "Great food").await.unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_gemini_no_candidates_falls_back_for_owner_query() {
    let (url, _) = spawn_vendor(StatusCode::OK, r#"{"candidates":[]}"#, Duration::ZERO).await;
    let provider = gemini(url, Duration::from_secs(5));

    let reply = answer_owner_query(&provider, "The Gilded Plate", "Tonight?", &[])
        .await
        .unwrap();
    assert_eq!(reply, OWNER_QUERY_FALLBACK);
}

#[tokio::test]
async fn test_gemini_unreadable_envelope_is_malformed() {
    let (url, _) = spawn_vendor(StatusCode::OK, "<html>proxy</html>", Duration::ZERO).await;
    let provider = gemini(url, Duration::from_secs(5));

    let err = analyze_review(&provider, "Great food").await.unwrap_err();
    assert!(matches!(err, MediationError::MalformedResponse(_)));
}

// ── Groq ──

#[tokio::test]
async fn test_groq_booking_with_fenced_json() {
    let reply = serde_json::json!({
        "reply": "Booked!",
        "intent": {
            "guestName": "Ana",
            "partySize": 2,
            "date": "2023-11-20",
            "time": "20:00",
            "isComplete": true
        }
    });
    let content = format!("```json\n{reply}\n```");
    let body = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string();
    let (url, fake) = spawn_vendor(StatusCode::OK, &body, Duration::ZERO).await;
    let provider = GroqProvider::new(
        "groq-key".to_string(),
        "llama".to_string(),
        url,
        Duration::from_secs(5),
    );

    let reply = continue_booking_conversation(&provider, "The Gilded Plate", "Ana, 2 at 8pm", &[])
        .await
        .unwrap();
    assert!(reply.intent.is_complete);
    assert_eq!(reply.intent.party_size, Some(2));

    let seen = fake.seen.lock().unwrap();
    assert_eq!(seen[0].path, "/chat/completions");
    assert_eq!(seen[0].headers["authorization"], "Bearer groq-key");
    assert_eq!(seen[0].body["response_format"]["type"], "json_object");
}

#[tokio::test]
async fn test_groq_unauthorized_is_unavailable() {
    let (url, _) = spawn_vendor(
        StatusCode::UNAUTHORIZED,
        r#"{"error":"bad key"}"#,
        Duration::ZERO,
    )
    .await;
    let provider = GroqProvider::new(
        "x".to_string(),
        "llama".to_string(),
        url,
        Duration::from_secs(5),
    );

    let err = continue_booking_conversation(&provider, "The Gilded Plate", "Hi", &[])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MediationError::ServiceUnavailable(ref m) if m.contains("rejected credentials")
    ));
}

// ── Ollama ──

#[tokio::test]
async fn test_ollama_owner_query_text() {
    let body = serde_json::json!({
        "message": { "role": "assistant", "content": "  Three confirmed tables tonight.\n" },
        "done": true
    })
    .to_string();
    let (url, fake) = spawn_vendor(StatusCode::OK, &body, Duration::ZERO).await;
    let provider = OllamaProvider::new(url, "llama3.2".to_string(), Duration::from_secs(5));

    let reply = answer_owner_query(&provider, "The Gilded Plate", "How many tonight?", &[])
        .await
        .unwrap();
    assert_eq!(reply, "Three confirmed tables tonight.");

    let seen = fake.seen.lock().unwrap();
    assert_eq!(seen[0].path, "/api/chat");
    assert_eq!(seen[0].body["stream"], false);
    assert!(seen[0].body.get("format").is_none());
}
