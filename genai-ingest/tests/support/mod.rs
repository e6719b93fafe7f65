#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http::Method;
use serde_json::json;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use genai_ingest::Client;

pub const TEST_KEY: &str = "test-key";

pub fn build_client(base_url: &str) -> Client {
    Client::builder()
        .api_key(TEST_KEY)
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn build_unauthenticated_client(base_url: &str) -> Client {
    Client::builder().base_url(base_url).build().unwrap()
}

/// Mounts a fake Files API.
///
/// Requests without `x-goog-api-key: test-key` are rejected with 401. Each
/// finalized session returns a fresh `files/upload-N` name.
pub async fn mount_files_api(server: &MockServer) -> Arc<AtomicUsize> {
    let upload_url = format!("{}/upload-session", server.uri());
    let counter = Arc::new(AtomicUsize::new(0));
    let uploads = counter.clone();

    Mock::given(any())
        .respond_with(move |req: &Request| {
            let authorized = req
                .headers
                .get("x-goog-api-key")
                .and_then(|value| value.to_str().ok())
                == Some(TEST_KEY);
            if !authorized {
                return ResponseTemplate::new(401).set_body_json(json!({
                    "error": {"code": 401, "status": "UNAUTHENTICATED"}
                }));
            }

            let command = req
                .headers
                .get("x-goog-upload-command")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("");
            let path = req.url.path();

            if command == "start" && path == "/upload/v1beta/files" {
                return ResponseTemplate::new(200)
                    .insert_header("x-goog-upload-url", upload_url.clone());
            }

            if path == "/upload-session" && command.contains("finalize") {
                let id = uploads.fetch_add(1, Ordering::SeqCst) + 1;
                return ResponseTemplate::new(200)
                    .insert_header("x-goog-upload-status", "final")
                    .set_body_json(json!({
                        "file": {
                            "name": format!("files/upload-{id}"),
                            "sizeBytes": req.body.len().to_string(),
                            "state": "PROCESSING"
                        }
                    }));
            }

            if path.starts_with("/v1beta/files/") && req.method == Method::GET {
                let name = path.trim_start_matches("/v1beta/");
                return ResponseTemplate::new(200).set_body_json(json!({
                    "name": name,
                    "state": "ACTIVE"
                }));
            }

            ResponseTemplate::new(404)
        })
        .mount(server)
        .await;

    counter
}

pub fn write_pdf(dir: &std::path::Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
