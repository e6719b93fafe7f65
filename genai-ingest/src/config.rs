//! Environment-driven settings.

use std::path::{Path, PathBuf};

/// Primary credential variable.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Fallback credential variable.
pub const FALLBACK_API_KEY_VAR: &str = "GEMINI_API_KEY";

const BASE_URL_VARS: [&str; 2] = ["GENAI_BASE_URL", "GEMINI_BASE_URL"];
const API_VERSION_VAR: &str = "GENAI_API_VERSION";

/// Settings read once from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSettings {
    /// `None` when neither credential variable is set. Not validated here.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
}

impl IngestSettings {
    /// 从环境变量读取配置（空值视为未设置）。
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = non_empty_var(API_KEY_VAR).or_else(|| non_empty_var(FALLBACK_API_KEY_VAR));
        let base_url = BASE_URL_VARS.iter().find_map(|key| non_empty_var(key));
        let api_version = non_empty_var(API_VERSION_VAR);
        Self {
            api_key,
            base_url,
            api_version,
        }
    }
}

/// Loads a dotenv-format settings file into the process environment.
///
/// With an explicit path the file must exist; otherwise `.env` is looked up
/// from the working directory and its absence is not an error. Variables
/// already present in the environment win. Returns the path that was loaded.
///
/// # Errors
/// 当显式指定的文件不存在或格式错误时返回错误。
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|()| Some(path.to_path_buf())),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(err) if err.not_found() => Ok(None),
            Err(err) => Err(err),
        },
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::with_env;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn google_api_key_takes_precedence() {
        with_env(
            &[
                ("GOOGLE_API_KEY", Some("google-key")),
                ("GEMINI_API_KEY", Some("gemini-key")),
            ],
            || {
                let settings = IngestSettings::from_env();
                assert_eq!(settings.api_key.as_deref(), Some("google-key"));
            },
        );
    }

    #[test]
    fn gemini_api_key_is_fallback() {
        with_env(
            &[
                ("GOOGLE_API_KEY", None),
                ("GEMINI_API_KEY", Some("gemini-key")),
            ],
            || {
                let settings = IngestSettings::from_env();
                assert_eq!(settings.api_key.as_deref(), Some("gemini-key"));
            },
        );
    }

    #[test]
    fn missing_key_is_not_an_error() {
        with_env(
            &[("GOOGLE_API_KEY", None), ("GEMINI_API_KEY", Some("  "))],
            || {
                let settings = IngestSettings::from_env();
                assert_eq!(settings.api_key, None);
            },
        );
    }

    #[test]
    fn endpoint_overrides_ignore_blank_values() {
        with_env(
            &[
                ("GENAI_BASE_URL", Some(" ")),
                ("GEMINI_BASE_URL", Some("https://alt.example.com")),
                ("GENAI_API_VERSION", Some("")),
            ],
            || {
                let settings = IngestSettings::from_env();
                assert_eq!(
                    settings.base_url.as_deref(),
                    Some("https://alt.example.com")
                );
                assert_eq!(settings.api_version, None);
            },
        );
    }

    #[test]
    fn explicit_env_file_populates_environment() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "GENAI_INGEST_TEST_ONLY=from-file").unwrap();
        with_env(&[("GENAI_INGEST_TEST_ONLY", None)], || {
            let loaded = load_env_file(Some(file.path())).unwrap();
            assert_eq!(loaded.as_deref(), Some(file.path()));
            assert_eq!(
                std::env::var("GENAI_INGEST_TEST_ONLY").as_deref(),
                Ok("from-file")
            );
        });
    }

    #[test]
    fn explicit_missing_env_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_env_file(Some(&dir.path().join("missing.env")));
        assert!(result.is_err());
    }
}
