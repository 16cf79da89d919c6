use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

use kontakt_webhook::email::resend::ResendMailer;
use kontakt_webhook::email::{Mailer, OutboundEmail};

type Captured = Arc<Mutex<Vec<Value>>>;

/// Stand-in for the Resend API: accepts one key, rejects everything else.
async fn fake_emails(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer re_good");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"statusCode": 401, "name": "validation_error", "message": "API key is invalid"})),
        );
    }

    captured.lock().unwrap().push(body);
    (StatusCode::OK, Json(json!({"id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"})))
}

async fn spawn_fake_resend() -> (SocketAddr, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/emails", post(fake_emails))
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake Resend failed");
    });
    (addr, captured)
}

fn message() -> OutboundEmail {
    OutboundEmail {
        from: "NordMails <kontakt@nordmails.test>".to_string(),
        to: "kari@firma.no".to_string(),
        reply_to: Some("admin@nordmails.test".to_string()),
        subject: "Takk for din henvendelse - NordMail".to_string(),
        html: "<p>Hei</p>".to_string(),
        text: "Hei".to_string(),
    }
}

#[tokio::test]
async fn sends_message_and_returns_id() {
    let (addr, captured) = spawn_fake_resend().await;
    let mailer = ResendMailer::new("re_good", &format!("http://{addr}/")).unwrap();

    let id = mailer.send(&message()).await.unwrap();
    assert_eq!(id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0]["to"], "kari@firma.no");
    assert_eq!(captured[0]["reply_to"], "admin@nordmails.test");
    assert_eq!(captured[0]["text"], "Hei");
}

#[tokio::test]
async fn provider_error_is_reported() {
    let (addr, _) = spawn_fake_resend().await;
    let mailer = ResendMailer::new("re_bad", &format!("http://{addr}")).unwrap();

    let err = mailer.send(&message()).await.unwrap_err();
    assert_eq!(
        err,
        "Email provider returned 401: validation_error: API key is invalid"
    );
}

#[tokio::test]
async fn unreachable_provider_is_an_error() {
    let mailer = ResendMailer::new("re_good", "http://127.0.0.1:9").unwrap();
    let err = mailer.send(&message()).await.unwrap_err();
    assert!(err.starts_with("Email request failed"), "{err}");
}
