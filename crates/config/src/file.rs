use std::path::Path;

use error_stack::{Result, ResultExt};
use model::{DuplicateReportPolicy, EscalationPolicy, ReactivationWarningPolicy};
use serde::{Deserialize, Serialize};
use simple_backend_config::file::ConfigFileUtils;
use url::Url;

pub const CONFIG_FILE_NAME: &str = "moderation_config.toml";

pub const DEFAULT_CONFIG_FILE_TEXT: &str = r#"

[moderation]
escalation_threshold = 3
reactivation_warning_policy = "retain" # or "reset"
duplicate_report_policy = "return_existing" # or "allow"

# [content_service]
# base_url = "http://127.0.0.1:4000"
# request_timeout_seconds = 10 # optional

"#;

#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("Simple backend error")]
    SimpleBackendError,

    #[error("Load config file")]
    LoadConfig,

    #[error("Invalid config")]
    InvalidConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub moderation: ModerationConfig,
    pub content_service: Option<ContentServiceConfig>,
}

impl ConfigFile {
    pub fn minimal_config_for_api_doc_json() -> Self {
        Self::default()
    }

    pub fn load(dir: impl AsRef<Path>) -> Result<ConfigFile, ConfigFileError> {
        let config_string =
            ConfigFileUtils::load_string(dir, CONFIG_FILE_NAME, DEFAULT_CONFIG_FILE_TEXT)
                .change_context(ConfigFileError::SimpleBackendError)?;
        Self::parse(&config_string)
    }

    pub fn parse(text: &str) -> Result<ConfigFile, ConfigFileError> {
        let file: ConfigFile = toml::from_str(text).change_context(ConfigFileError::LoadConfig)?;
        if EscalationPolicy::new(file.moderation.escalation_threshold).is_none() {
            return Err(ConfigFileError::InvalidConfig)
                .attach_printable("Escalation threshold must be at least 1");
        }
        Ok(file)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationConfig {
    #[serde(default = "default_escalation_threshold")]
    pub escalation_threshold: i64,
    #[serde(default)]
    pub reactivation_warning_policy: ReactivationWarningPolicy,
    #[serde(default)]
    pub duplicate_report_policy: DuplicateReportPolicy,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: default_escalation_threshold(),
            reactivation_warning_policy: ReactivationWarningPolicy::default(),
            duplicate_report_policy: DuplicateReportPolicy::default(),
        }
    }
}

fn default_escalation_threshold() -> i64 {
    EscalationPolicy::DEFAULT_THRESHOLD
}

/// Content Lookup service which stores threads and comments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentServiceConfig {
    pub base_url: Url,
    request_timeout_seconds: Option<u64>,
}

impl ContentServiceConfig {
    pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout_seconds: None,
        }
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
            .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_file_is_valid() {
        let file = ConfigFile::parse(DEFAULT_CONFIG_FILE_TEXT).unwrap();
        assert_eq!(file.moderation.escalation_threshold, 3);
        assert_eq!(
            file.moderation.reactivation_warning_policy,
            ReactivationWarningPolicy::Retain
        );
        assert_eq!(
            file.moderation.duplicate_report_policy,
            DuplicateReportPolicy::ReturnExisting
        );
        assert!(file.content_service.is_none());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = ConfigFile::parse("").unwrap();
        assert_eq!(file.moderation.escalation_threshold, 3);
    }

    #[test]
    fn zero_threshold_is_invalid() {
        let text = r#"
        [moderation]
        escalation_threshold = 0
        "#;
        assert!(ConfigFile::parse(text).is_err());
    }

    #[test]
    fn content_service_timeout_has_default() {
        let text = r#"
        [moderation]
        reactivation_warning_policy = "reset"
        duplicate_report_policy = "allow"

        [content_service]
        base_url = "http://127.0.0.1:4000"
        "#;
        let file = ConfigFile::parse(text).unwrap();
        assert_eq!(
            file.moderation.reactivation_warning_policy,
            ReactivationWarningPolicy::Reset
        );
        assert_eq!(file.moderation.duplicate_report_policy, DuplicateReportPolicy::Allow);
        let content = file.content_service.unwrap();
        assert_eq!(content.request_timeout_seconds(), 10);
        assert_eq!(content.base_url.as_str(), "http://127.0.0.1:4000/");
    }
}
