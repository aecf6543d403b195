use std::{
    io::Write,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use error_stack::{Report, Result, ResultExt};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "simple_backend_config.toml";

// Optional configs not in default file for safety:
// debug = false
//

pub const DEFAULT_CONFIG_FILE_TEXT: &str = r#"

# [general]
# log_timestamp = true

[socket]
public_api = "127.0.0.1:3000"

[data]
dir = "data"

"#;

#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("Save config file failed")]
    Save,
    #[error("Save default")]
    SaveDefault,
    #[error("Not a directory")]
    NotDirectory,
    #[error("Load config file")]
    LoadConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimpleBackendConfigFile {
    #[serde(default)]
    pub general: GeneralConfig,

    pub data: DataConfig,
    pub socket: SocketConfig,
}

impl SimpleBackendConfigFile {
    pub fn minimal_config_for_api_doc_json() -> Self {
        Self {
            general: GeneralConfig::default(),
            data: DataConfig {
                dir: PathBuf::new(),
            },
            socket: SocketConfig {
                public_api: SocketAddr::from(([127, 0, 0, 1], 3000)),
            },
        }
    }

    pub fn load(dir: impl AsRef<Path>) -> Result<SimpleBackendConfigFile, ConfigFileError> {
        let config_string =
            ConfigFileUtils::load_string(dir, CONFIG_FILE_NAME, DEFAULT_CONFIG_FILE_TEXT)?;
        Self::parse(&config_string)
    }

    pub fn parse(text: &str) -> Result<SimpleBackendConfigFile, ConfigFileError> {
        toml::from_str(text).change_context(ConfigFileError::LoadConfig)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub debug: Option<bool>,
    /// Write timestamp to log messages. Enabled by default.
    pub log_timestamp: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Data directory for SQLite databases.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SocketConfig {
    pub public_api: SocketAddr,
}

pub struct ConfigFileUtils;

impl ConfigFileUtils {
    pub fn save_string(file_path: impl AsRef<Path>, text: &str) -> Result<(), ConfigFileError> {
        let mut file = std::fs::File::create(file_path).change_context(ConfigFileError::Save)?;
        file.write_all(text.as_bytes())
            .change_context(ConfigFileError::Save)?;
        Ok(())
    }

    pub fn join_dir_path_and_file_name(
        dir: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<PathBuf, ConfigFileError> {
        if !dir.as_ref().is_dir() {
            return Err(Report::new(ConfigFileError::NotDirectory));
        }
        let mut file_path = dir.as_ref().to_path_buf();
        file_path.push(file_name);
        Ok(file_path)
    }

    /// Load file as string. If the file does not exist, the default
    /// text is written to the file first.
    pub fn load_string(
        dir: impl AsRef<Path>,
        file_name: &str,
        default: &str,
    ) -> Result<String, ConfigFileError> {
        let file_path = Self::join_dir_path_and_file_name(&dir, file_name)
            .change_context(ConfigFileError::LoadConfig)?;
        if !file_path.exists() {
            Self::save_string(&file_path, default).change_context(ConfigFileError::SaveDefault)?;
        }

        std::fs::read_to_string(&file_path).change_context(ConfigFileError::LoadConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_file_is_valid() {
        let config = SimpleBackendConfigFile::parse(DEFAULT_CONFIG_FILE_TEXT).unwrap();
        assert_eq!(config.socket.public_api, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert!(config.general.debug.is_none());
    }

    #[test]
    fn missing_socket_section_is_error() {
        let text = r#"
        [data]
        dir = "data"
        "#;
        assert!(SimpleBackendConfigFile::parse(text).is_err());
    }

    #[test]
    fn load_string_creates_missing_file() {
        let dir = std::env::temp_dir().join(format!(
            "simple_backend_config_test_{}_{}",
            std::process::id(),
            simple_backend_utils::current_unix_time(),
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let text = ConfigFileUtils::load_string(&dir, "test.toml", "value = 1").unwrap();
        assert_eq!(text, "value = 1");
        assert!(dir.join("test.toml").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
