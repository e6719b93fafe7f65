//! Resumable upload session protocol.
//!
//! A session is opened with a `start` command carrying the file metadata and
//! then the entire payload is sent in a single `upload, finalize` request.

use genai_ingest_types::files::File;
use serde_json::Value;

use crate::client::ClientInner;
use crate::error::{Error, Result};

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";
const UPLOAD_STATUS_HEADER: &str = "x-goog-upload-status";

/// Metadata sent when opening a session.
pub(crate) struct SessionRequest<'a> {
    pub file: &'a File,
    pub size_bytes: u64,
    pub mime_type: &'a str,
    pub file_name: Option<&'a str>,
}

pub(crate) struct UploadSession<'a> {
    inner: &'a ClientInner,
    url: String,
}

impl<'a> UploadSession<'a> {
    pub(crate) async fn start(inner: &'a ClientInner, request: SessionRequest<'_>) -> Result<Self> {
        let url = build_files_upload_url(inner);
        let mut builder = inner
            .http
            .post(url)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header(
                "X-Goog-Upload-Header-Content-Length",
                request.size_bytes.to_string(),
            )
            .header("X-Goog-Upload-Header-Content-Type", request.mime_type);

        if let Some(file_name) = request.file_name {
            builder = builder.header("X-Goog-Upload-File-Name", file_name);
        }

        let body = serde_json::json!({ "file": request.file });
        let response = inner.send(builder.json(&body)).await?;
        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        let url = response
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::Parse {
                message: "Missing x-goog-upload-url header".into(),
            })?
            .to_string();

        tracing::info!(
            size_bytes = request.size_bytes,
            mime_type = request.mime_type,
            "upload session opened"
        );
        Ok(Self { inner, url })
    }

    /// Sends the whole payload and closes the session.
    pub(crate) async fn finalize(self, body: reqwest::Body, size_bytes: u64) -> Result<File> {
        let request = self
            .inner
            .http
            .post(&self.url)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .header("Content-Length", size_bytes.to_string())
            .body(body);
        let response = self.inner.send(request).await?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        let upload_status = response
            .headers()
            .get(UPLOAD_STATUS_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::Parse {
                message: "Missing x-goog-upload-status header".into(),
            })?
            .to_string();

        let body = response.bytes().await?;
        let file = parse_file_body(&body)?;
        let file = finalize_upload(&upload_status, file)?;
        tracing::info!(name = file.name_or_default(), "upload finalized");
        Ok(file)
    }
}

pub(crate) fn finalize_upload(status: &str, file: Option<File>) -> Result<File> {
    if status != "final" {
        return Err(Error::Parse {
            message: format!("Upload finalize failed: {status}"),
        });
    }
    let file = file.ok_or_else(|| Error::Parse {
        message: "Upload completed but response body was empty".into(),
    })?;
    if file.name.as_deref().is_none_or(str::is_empty) {
        return Err(Error::Parse {
            message: "Upload completed but the file has no name".into(),
        });
    }
    Ok(file)
}

/// Accepts either a bare `File` or `{"file": File}`.
fn parse_file_body(body: &[u8]) -> Result<Option<File>> {
    if body.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body)?;
    let file_value = value.get("file").cloned().unwrap_or(value);
    Ok(Some(serde_json::from_value(file_value)?))
}

pub(crate) fn build_files_upload_url(inner: &ClientInner) -> String {
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    format!("{base}upload/{version}/files")
}
