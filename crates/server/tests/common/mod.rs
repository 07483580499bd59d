//! # Common Test Utilities
//!
//! `TestApp` spawns a real server on a random port. Its completion provider is
//! an OpenAI-compatible `httpmock::MockServer`, and its templates, config and
//! session log live in a temporary directory.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::{Method::POST, Mock, MockServer};
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs, net::SocketAddr, path::PathBuf};
use studymate_server::{
    config, router,
    state::{build_app_state, AppState},
};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, sync::oneshot};

pub const SUMMARY_MARKER: &str = "SUMMARIZE THIS:";
pub const QA_MARKER: &str = "WRITE QUESTIONS FOR:";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub log_path: PathBuf,
    pub app_state: AppState,
    _dir: TempDir,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let dir = tempdir()?;

        let summary_path = dir.path().join("summary_template.txt");
        let qa_path = dir.path().join("qa_template.txt");
        fs::write(&summary_path, format!("{SUMMARY_MARKER}\n{{text}}"))?;
        fs::write(&qa_path, format!("{QA_MARKER}\n{{text}}"))?;
        let log_path = dir.path().join("logs").join("session_log.json");

        let config_path = dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
log_path: "{}"
max_words: 1000
prompts:
  summary_template_path: "{}"
  qa_template_path: "{}"
provider:
  provider: "local"
  api_url: "{}"
  model_name: "mock-chat-model"
"#,
            log_path.display(),
            summary_path.display(),
            qa_path.display(),
            mock_server.url(COMPLETIONS_PATH)
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config)?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let state_for_server = app_state.clone();
        tokio::spawn(async move {
            let app = router::create_router(state_for_server);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            log_path,
            app_state,
            _dir: dir,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Mocks one completion: any request whose body contains every string in
    /// `body_contains` gets `reply` as its first choice.
    pub async fn mock_completion(&self, body_contains: &[&str], reply: &str) -> Mock<'_> {
        let body_contains: Vec<String> = body_contains.iter().map(|s| s.to_string()).collect();
        let reply = reply.to_string();
        self.mock_server
            .mock_async(|when, then| {
                let mut when = when.method(POST).path(COMPLETIONS_PATH);
                for fragment in &body_contains {
                    when = when.body_contains(fragment.as_str());
                }
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": reply}}]
                }));
            })
            .await
    }

    /// Parses the session log as written to disk.
    pub fn read_log(&self) -> Result<Vec<Value>> {
        let raw = fs::read_to_string(&self.log_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
