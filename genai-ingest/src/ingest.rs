//! The one-shot ingest flow: announce, upload, report.

use std::io::Write;
use std::path::PathBuf;

use genai_ingest_types::files::{File, UploadFileConfig};

use crate::client::Client;
use crate::error::Result;
use crate::files::WaitForFileConfig;
use crate::report;

/// What to upload and how to describe it afterwards.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub path: PathBuf,
    pub upload: UploadFileConfig,
    /// Model named in the printed usage hint.
    pub model: String,
    /// Poll until the file is `ACTIVE` before printing the hint.
    pub wait: Option<WaitForFileConfig>,
}

impl IngestRequest {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            upload: UploadFileConfig::default(),
            model: report::DEFAULT_MODEL.to_string(),
            wait: None,
        }
    }
}

/// Uploads `request.path` and writes the three report lines to `out`.
///
/// Nothing past the first line is written unless the upload succeeds.
///
/// # Errors
/// 上传、轮询或写入输出失败时返回错误。
pub async fn run(client: &Client, request: &IngestRequest, out: &mut impl Write) -> Result<File> {
    report::write_uploading(out)?;
    out.flush()?;

    let files = client.files();
    let mut file = files
        .upload_from_path_with_config(&request.path, request.upload.clone())
        .await?;
    report::write_complete(out, &file)?;

    if let Some(wait) = &request.wait {
        file = files
            .wait_for_active(file.name_or_default(), wait.clone())
            .await?;
    }

    report::write_usage_hint(out, &request.model)?;
    Ok(file)
}
