#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod args;
pub mod file;

use std::sync::Arc;

use args::{AppMode, ArgsConfig};
use error_stack::{Result, ResultExt};
use file::{ConfigFile, ContentServiceConfig};
use model::{DuplicateReportPolicy, EscalationPolicy, ReactivationWarningPolicy};
use simple_backend_config::SimpleBackendConfig;

#[derive(thiserror::Error, Debug)]
pub enum GetConfigError {
    #[error("Simple backend error")]
    SimpleBackendError,

    #[error("Get working directory error")]
    GetWorkingDir,
    #[error("File loading failed")]
    LoadFileError,

    #[error("Invalid configuration")]
    InvalidConfiguration,
}

#[derive(Debug, Clone)]
pub struct Config {
    file: ConfigFile,
    simple_backend_config: Arc<SimpleBackendConfig>,
    escalation_policy: EscalationPolicy,

    // Other configs
    mode: Option<AppMode>,
}

impl Config {
    pub fn new(
        file: ConfigFile,
        simple_backend_config: Arc<SimpleBackendConfig>,
        mode: Option<AppMode>,
    ) -> Result<Self, GetConfigError> {
        let escalation_policy = EscalationPolicy::new(file.moderation.escalation_threshold)
            .ok_or(GetConfigError::InvalidConfiguration)
            .attach_printable("Escalation threshold must be at least 1")?;

        Ok(Self {
            file,
            simple_backend_config,
            escalation_policy,
            mode,
        })
    }

    pub fn minimal_config_for_api_doc_json(
        simple_backend_config: Arc<SimpleBackendConfig>,
    ) -> Self {
        Self {
            file: ConfigFile::minimal_config_for_api_doc_json(),
            simple_backend_config,
            escalation_policy: EscalationPolicy::default(),
            mode: None,
        }
    }

    /// Server should run in debug mode.
    ///
    /// Check also [SimpleBackendConfig::debug_mode].
    pub fn debug_mode(&self) -> bool {
        self.simple_backend_config.debug_mode()
    }

    /// Server binary was launched in a special mode instead of the server mode.
    ///
    /// If None then the mode is the server mode.
    pub fn current_mode(&self) -> Option<AppMode> {
        self.mode.clone()
    }

    pub fn escalation_policy(&self) -> EscalationPolicy {
        self.escalation_policy
    }

    pub fn reactivation_warning_policy(&self) -> ReactivationWarningPolicy {
        self.file.moderation.reactivation_warning_policy
    }

    pub fn duplicate_report_policy(&self) -> DuplicateReportPolicy {
        self.file.moderation.duplicate_report_policy
    }

    /// If None, content lookups are disabled.
    pub fn content_service(&self) -> Option<&ContentServiceConfig> {
        self.file.content_service.as_ref()
    }

    pub fn simple_backend(&self) -> &Arc<SimpleBackendConfig> {
        &self.simple_backend_config
    }

    pub fn parsed_file(&self) -> &ConfigFile {
        &self.file
    }
}

/// Read config files from current directory.
pub fn get_config(args_config: ArgsConfig) -> Result<Config, GetConfigError> {
    let simple_backend_config = simple_backend_config::get_config(args_config.server)
        .change_context(GetConfigError::SimpleBackendError)?;

    let current_dir = std::env::current_dir().change_context(GetConfigError::GetWorkingDir)?;
    let file_config =
        file::ConfigFile::load(&current_dir).change_context(GetConfigError::LoadFileError)?;

    Config::new(file_config, simple_backend_config.into(), args_config.mode)
}

#[cfg(test)]
mod tests {
    use simple_backend_config::{args::ServerModeArgs, file::SimpleBackendConfigFile};

    use super::*;

    fn simple_backend_config() -> Arc<SimpleBackendConfig> {
        let mut file = SimpleBackendConfigFile::minimal_config_for_api_doc_json();
        file.general.debug = Some(true);
        let args = ServerModeArgs {
            data_dir: None,
            sqlite_in_ram: true,
        };
        SimpleBackendConfig::new(file, args).unwrap().into()
    }

    #[test]
    fn config_uses_threshold_from_file() {
        let file = ConfigFile::parse(
            r#"
            [moderation]
            escalation_threshold = 5
            "#,
        )
        .unwrap();
        let config = Config::new(file, simple_backend_config(), None).unwrap();
        assert_eq!(config.escalation_policy().threshold(), 5);
        assert!(config.content_service().is_none());
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let mut file = ConfigFile::default();
        file.moderation.escalation_threshold = 0;
        assert!(Config::new(file, simple_backend_config(), None).is_err());
    }
}
