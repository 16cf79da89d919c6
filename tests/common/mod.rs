use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use kontakt_webhook::config::{Config, Environment, MailConfig, MailProvider};
use kontakt_webhook::db::LeadStore;
use kontakt_webhook::email::{Mailer, OutboundEmail};
use kontakt_webhook::models::SubmissionRecord;

pub const ADMIN_EMAIL: &str = "admin@nordmails.test";
pub const WEBHOOK_PATH: &str = "/.netlify/functions/kontakt";

/// Which sends the fake provider should reject.
#[derive(Default, Clone, Copy)]
pub struct MailerBehaviour {
    pub fail_admin: bool,
    pub fail_auto_reply: bool,
    pub panic: bool,
}

/// Records every message instead of delivering it.
pub struct RecordingMailer {
    behaviour: MailerBehaviour,
    pub sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, String> {
        if self.behaviour.panic {
            panic!("provider client crashed");
        }
        // Simulated provider latency
        tokio::time::sleep(Duration::from_millis(20)).await;

        let is_admin = email.to == ADMIN_EMAIL;
        if is_admin && self.behaviour.fail_admin {
            return Err("admin mailbox rejected message".to_string());
        }
        if !is_admin && self.behaviour.fail_auto_reply {
            return Err("recipient domain not verified".to_string());
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(format!("test-{}", sent.len()))
    }
}

impl RecordingMailer {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

pub struct RecordingStore {
    fail: bool,
    pub inserted: Mutex<Vec<SubmissionRecord>>,
}

#[async_trait]
impl LeadStore for RecordingStore {
    async fn insert(&self, record: &SubmissionRecord) -> Result<Uuid, String> {
        if self.fail {
            return Err("Database error: connection refused".to_string());
        }
        self.inserted.lock().unwrap().push(record.clone());
        Ok(Uuid::now_v7())
    }
}

impl RecordingStore {
    pub fn inserted_count(&self) -> usize {
        self.inserted.lock().unwrap().len()
    }
}

#[derive(Default)]
pub struct TestOptions {
    pub mailer: MailerBehaviour,
    /// `None` runs without a database; `Some(true)` gives a store that always fails.
    pub store_fails: Option<bool>,
    pub development: bool,
    pub max_body_size: Option<usize>,
}

/// A running server wired to in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub mailer: Arc<RecordingMailer>,
    pub store: Option<Arc<RecordingStore>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, path: &str, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(data)
            .send()
            .await
            .expect("post json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("post raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit to the webhook endpoint, return (body, status).
    pub async fn webhook(&self, data: &Value) -> (Value, StatusCode) {
        self.post_json(WEBHOOK_PATH, data).await
    }

    pub fn inserted_count(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.inserted_count())
    }
}

/// Logical submission fields as the site's form names them.
pub fn form_fields() -> Value {
    json!({
        "navn": "Kari Nordmann",
        "email": "Kari@Firma.no",
        "nettside": "https://firma.no",
        "tjeneste": "email-flows",
        "budsjett": "10000-25000",
        "melding": "Vi vil komme i gang med flows.",
        "bot-field": ""
    })
}

/// Relay-format webhook body wrapping `data`.
pub fn relay_payload(data: Value) -> Value {
    json!({
        "payload": {
            "data": data,
            "form_name": "kontakt",
            "created_at": "2025-03-01T10:15:00.000Z"
        }
    })
}

pub fn test_config(development: bool) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        database_url: None,
        mail: MailConfig {
            admin_email: ADMIN_EMAIL.to_string(),
            from: "NordMails <kontakt@nordmails.test>".to_string(),
        },
        provider: MailProvider::Resend {
            api_key: "re_test".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
        },
        environment: if development {
            Environment::Development
        } else {
            Environment::Production
        },
        max_body_size: 1_048_576,
        success_url: "/takk.html".to_string(),
        log_level: "warn".to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default()).await
}

pub async fn spawn_app_with(options: TestOptions) -> TestApp {
    let mailer = Arc::new(RecordingMailer {
        behaviour: options.mailer,
        sent: Mutex::new(Vec::new()),
    });
    let store = options.store_fails.map(|fail| {
        Arc::new(RecordingStore {
            fail,
            inserted: Mutex::new(Vec::new()),
        })
    });

    let state = kontakt_webhook::build_state(
        Config {
            max_body_size: options.max_body_size.unwrap_or(1_048_576),
            ..test_config(options.development)
        },
        mailer.clone(),
        store.clone().map(|s| s as Arc<dyn LeadStore>),
    );
    let app = kontakt_webhook::build_app(state);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        mailer,
        store,
    }
}
