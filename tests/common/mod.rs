use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use intake::config::Config;
use intake::email::Notifier;
use intake::sheets::SheetStore;
use intake::state::{AppState, SharedState};

pub const NOTIFY_TO: &str = "team@example.com";
pub const SHEET_ID: &str = "sheet-under-test";

/// In-memory spreadsheet. Rows include the header once written.
#[derive(Default)]
pub struct MemorySheet {
    pub rows: Mutex<Vec<Vec<String>>>,
    pub fail_append: bool,
}

#[async_trait]
impl SheetStore for MemorySheet {
    fn id(&self) -> &str {
        SHEET_ID
    }

    async fn row_count(&self) -> Result<usize, String> {
        Ok(self.rows.lock().unwrap().len())
    }

    async fn write_header(&self, header: Vec<String>) -> Result<(), String> {
        let mut rows = self.rows.lock().unwrap();
        if rows.is_empty() {
            rows.push(header);
        } else {
            rows[0] = header;
        }
        Ok(())
    }

    async fn append_row(&self, row: Vec<String>) -> Result<(), String> {
        if self.fail_append {
            return Err("Service Spreadsheets failed while accessing document".to_string());
        }
        self.rows.lock().unwrap().push(row);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records every attempted send, including the ones it fails.
#[derive(Default)]
pub struct MemoryMailer {
    pub attempts: Mutex<Vec<SentMail>>,
    pub fail: bool,
}

impl MemoryMailer {
    pub fn attempts(&self) -> Vec<SentMail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MemoryMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        self.attempts.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.fail {
            return Err("Failed to send email: connection refused".to_string());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TestOptions {
    pub no_sheet: bool,
    pub sheet_fails: bool,
    pub mail_fails: bool,
}

/// A running test server with in-memory collaborators and a temporary site root.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub sheet: Arc<MemorySheet>,
    pub mailer: Arc<MemoryMailer>,
    pub site_root: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post a JSON submission to the intake endpoint, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/applications"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Post a raw body with the given content type, return (body, status).
    pub async fn submit_raw(&self, body: &str, content_type: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/applications"))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Data rows, header excluded.
    pub fn data_rows(&self) -> Vec<Vec<String>> {
        self.sheet.rows.lock().unwrap().iter().skip(1).cloned().collect()
    }
}

fn test_config(site_root: PathBuf) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        site_root,
        intake_path: "/api/applications".to_string(),
        cors_origin: "*".to_string(),
        max_body_size: 16 * 1024,
        log_level: "warn".to_string(),
        notify_to: NOTIFY_TO.to_string(),
        sheet: Some(intake::config::SheetConfig {
            id: SHEET_ID.to_string(),
            name: "Sheet1".to_string(),
            access_token: "unused".to_string(),
            api_base: "http://localhost:0".to_string(),
        }),
        smtp: None,
    }
}

fn write_site(root: &PathBuf) {
    std::fs::create_dir_all(root.join("css")).unwrap();
    std::fs::create_dir_all(root.join("about")).unwrap();
    std::fs::write(root.join("index.html"), "<html><body>home</body></html>").unwrap();
    std::fs::write(root.join("about/index.html"), "<html><body>about</body></html>").unwrap();
    std::fs::write(root.join("app.js"), "console.log('app');").unwrap();
    std::fs::write(root.join("css/site.css"), "body { margin: 0; }").unwrap();
    std::fs::write(root.join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default()).await
}

/// Shared state wired to in-memory collaborators, plus handles to inspect them.
pub fn test_state(
    options: &TestOptions,
    site_root: PathBuf,
) -> (SharedState, Arc<MemorySheet>, Arc<MemoryMailer>) {
    let sheet = Arc::new(MemorySheet {
        rows: Mutex::new(Vec::new()),
        fail_append: options.sheet_fails,
    });
    let mailer = Arc::new(MemoryMailer {
        attempts: Mutex::new(Vec::new()),
        fail: options.mail_fails,
    });

    let mut config = test_config(site_root);
    if options.no_sheet {
        config.sheet = None;
    }

    let state = Arc::new(AppState {
        config,
        sheet: if options.no_sheet {
            None
        } else {
            Some(sheet.clone() as Arc<dyn SheetStore>)
        },
        notifier: Some(mailer.clone() as Arc<dyn Notifier>),
    });

    (state, sheet, mailer)
}

pub async fn spawn_app_with(options: TestOptions) -> TestApp {
    let site_root = std::env::temp_dir().join(format!("intake_test_{}", Uuid::now_v7().simple()));
    write_site(&site_root);

    let (state, sheet, mailer) = test_state(&options, site_root.clone());

    let app = intake::build_app(state);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        sheet,
        mailer,
        site_root,
    }
}

/// Remove the temporary site root.
pub fn cleanup(app: TestApp) {
    let _ = std::fs::remove_dir_all(&app.site_root);
}
