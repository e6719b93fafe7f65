//! Files API surface.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use genai_ingest_types::enums::FileState;
use genai_ingest_types::files::{File, UploadFileConfig};
use tokio_util::io::ReaderStream;

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::upload::{SessionRequest, UploadSession};

#[derive(Clone)]
pub struct Files {
    pub(crate) inner: Arc<ClientInner>,
}

impl Files {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 上传文件（直接上传字节数据）。
    ///
    /// # Errors
    /// 当请求失败或服务端拒绝上传时返回错误。
    pub async fn upload(&self, data: Vec<u8>, mime_type: impl Into<String>) -> Result<File> {
        let config = UploadFileConfig {
            mime_type: Some(mime_type.into()),
            ..UploadFileConfig::default()
        };
        self.upload_with_config(data, config).await
    }

    /// 上传文件（自定义配置）。
    ///
    /// # Errors
    /// 当缺少 `mime_type`、请求失败或服务端拒绝上传时返回错误。
    pub async fn upload_with_config(
        &self,
        data: Vec<u8>,
        config: UploadFileConfig,
    ) -> Result<File> {
        let mime_type = config
            .mime_type
            .clone()
            .ok_or_else(|| Error::InvalidConfig {
                message: "mime_type is required when uploading raw bytes".into(),
            })?;
        let size_bytes = data.len() as u64;
        let file = build_upload_file(config, size_bytes, &mime_type);
        let session = UploadSession::start(
            &self.inner,
            SessionRequest {
                file: &file,
                size_bytes,
                mime_type: &mime_type,
                file_name: None,
            },
        )
        .await?;
        session.finalize(reqwest::Body::from(data), size_bytes).await
    }

    /// 从文件路径上传。
    ///
    /// # Errors
    /// 当路径不存在或不是文件（此时不会发起网络请求）、请求失败或服务端拒绝上传时返回错误。
    pub async fn upload_from_path(&self, path: impl AsRef<Path>) -> Result<File> {
        self.upload_from_path_with_config(path, UploadFileConfig::default())
            .await
    }

    /// 从文件路径上传（自定义配置）。
    ///
    /// # Errors
    /// 同 [`Files::upload_from_path`]。
    pub async fn upload_from_path_with_config(
        &self,
        path: impl AsRef<Path>,
        mut config: UploadFileConfig,
    ) -> Result<File> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(Error::InvalidConfig {
                message: format!("{} is not a valid file path", path.display()),
            });
        }
        let file_handle = tokio::fs::File::open(path).await?;

        let size_bytes = metadata.len();
        let mime_type = if let Some(value) = config.mime_type.take() {
            value
        } else {
            mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        };

        let file_name = path.file_name().and_then(|name| name.to_str());
        let file = build_upload_file(config, size_bytes, &mime_type);
        let session = UploadSession::start(
            &self.inner,
            SessionRequest {
                file: &file,
                size_bytes,
                mime_type: &mime_type,
                file_name,
            },
        )
        .await?;

        // The body owns the handle, so it is closed on every exit path.
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file_handle));
        session.finalize(body, size_bytes).await
    }

    /// 获取文件元数据。
    ///
    /// # Errors
    /// 当名称无效、请求失败或服务端返回错误时返回错误。
    pub async fn get(&self, name_or_uri: impl AsRef<str>) -> Result<File> {
        let file_name = normalize_file_name(name_or_uri.as_ref())?;
        let url = build_file_url(&self.inner, &file_name);
        let response = self.inner.send(self.inner.http.get(url)).await?;
        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }
        Ok(response.json::<File>().await?)
    }

    /// 轮询直到文件状态变为 ACTIVE。
    ///
    /// # Errors
    /// 文件处理失败返回 `FileProcessing`，超时返回 `Timeout`。
    pub async fn wait_for_active(
        &self,
        name_or_uri: impl AsRef<str>,
        config: WaitForFileConfig,
    ) -> Result<File> {
        let start = Instant::now();
        loop {
            let file = self.get(name_or_uri.as_ref()).await?;
            match file.state {
                Some(FileState::Active) => return Ok(file),
                Some(FileState::Failed) => {
                    let message = file
                        .error
                        .and_then(|status| status.message)
                        .unwrap_or_else(|| "no details".into());
                    return Err(Error::FileProcessing { message });
                }
                state => {
                    let state = state.unwrap_or(FileState::StateUnspecified);
                    tracing::debug!(%state, "file not active yet");
                }
            }

            if let Some(timeout) = config.timeout {
                if start.elapsed() >= timeout {
                    return Err(Error::Timeout {
                        message: "Timed out waiting for file to become ACTIVE".into(),
                    });
                }
            }

            tokio::time::sleep(config.poll_interval).await;
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaitForFileConfig {
    pub poll_interval: Duration,
    pub timeout: Option<Duration>,
}

impl Default for WaitForFileConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: Some(Duration::from_secs(300)),
        }
    }
}

fn build_upload_file(config: UploadFileConfig, size_bytes: u64, mime_type: &str) -> File {
    File {
        name: config.name.as_deref().map(normalize_upload_name),
        display_name: config.display_name,
        mime_type: Some(mime_type.to_string()),
        size_bytes: Some(size_bytes.to_string()),
        ..File::default()
    }
}

fn normalize_upload_name(name: &str) -> String {
    if name.starts_with("files/") {
        name.to_string()
    } else {
        format!("files/{name}")
    }
}

fn normalize_file_name(value: &str) -> Result<String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        let marker = "files/";
        let start = value.find(marker).ok_or_else(|| Error::InvalidConfig {
            message: format!("Could not find 'files/' in URI: {value}"),
        })?;
        let suffix = &value[start + marker.len()..];
        let name: String = suffix
            .chars()
            .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect();
        if name.is_empty() {
            return Err(Error::InvalidConfig {
                message: format!("Could not extract file name from URI: {value}"),
            });
        }
        Ok(name)
    } else if let Some(name) = value.strip_prefix("files/") {
        Ok(name.to_string())
    } else {
        Ok(value.to_string())
    }
}

fn build_file_url(inner: &ClientInner, name: &str) -> String {
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    format!("{base}{version}/files/{name}")
}
