#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod args;
pub mod file;

use std::{
    path::{Path, PathBuf},
    sync::atomic::AtomicBool,
};

use args::ServerModeArgs;
use error_stack::{Result, ResultExt};

use self::file::{SimpleBackendConfigFile, SocketConfig};

/// Config file debug mode status.
///
/// Parse the config file before reading this value.
pub static RUNNING_IN_DEBUG_MODE: GlobalDebugFlag = GlobalDebugFlag {
    debug: AtomicBool::new(false),
};

pub struct GlobalDebugFlag {
    debug: AtomicBool,
}

impl GlobalDebugFlag {
    pub fn value(&self) -> bool {
        self.debug.load(std::sync::atomic::Ordering::Relaxed)
    }
}

pub use self::file::ConfigFileError;

#[derive(thiserror::Error, Debug)]
pub enum GetConfigError {
    #[error("Get working directory error")]
    GetWorkingDir,
    #[error("File loading failed")]
    LoadFileError,
    #[error("Load config file")]
    LoadConfig,

    #[error("SQLite in RAM mode is not allowed when debug mode is off")]
    SqliteInRamNotAllowed,
    #[error("Invalid configuration")]
    InvalidConfiguration,
    #[error("Directory creation failed")]
    DirCreationError,
}

#[derive(Debug, Clone)]
pub struct SimpleBackendConfig {
    file: SimpleBackendConfigFile,

    // Server related configs
    data_dir: PathBuf,
    sqlite_in_ram: bool,
}

impl SimpleBackendConfig {
    /// Build config from already parsed config file.
    pub fn new(
        file: SimpleBackendConfigFile,
        args: ServerModeArgs,
    ) -> Result<Self, GetConfigError> {
        let data_dir = if let Some(dir) = args.data_dir {
            dir
        } else {
            file.data.dir.clone()
        };

        let sqlite_in_ram = if args.sqlite_in_ram {
            if file.general.debug.unwrap_or_default() {
                true
            } else {
                return Err(GetConfigError::SqliteInRamNotAllowed)
                    .attach_printable("SQLite in RAM mode is not allowed when debug mode is off");
            }
        } else {
            false
        };

        if !sqlite_in_ram && !data_dir.exists() {
            std::fs::create_dir_all(&data_dir).change_context(GetConfigError::DirCreationError)?;
        } else if !sqlite_in_ram && !data_dir.is_dir() {
            return Err(GetConfigError::InvalidConfiguration)
                .attach_printable("Data directory config does not point to a directory");
        }

        let config = SimpleBackendConfig {
            file,
            data_dir,
            sqlite_in_ram,
        };

        if config.debug_mode() {
            RUNNING_IN_DEBUG_MODE
                .debug
                .store(true, std::sync::atomic::Ordering::Relaxed);
        }

        Ok(config)
    }

    /// Directory where SQLite databases are stored.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn databases(&self) -> &DatabaseInfo {
        &DATABASES
    }

    pub fn socket(&self) -> &SocketConfig {
        &self.file.socket
    }

    pub fn sqlite_in_ram(&self) -> bool {
        self.sqlite_in_ram
    }

    /// Server should run in debug mode.
    ///
    /// Debug mode changes:
    /// * Swagger UI is enabled.
    /// * HTTP request tracing is enabled.
    /// * SQLite in RAM mode is allowed.
    /// * Atomic boolean `RUNNING_IN_DEBUG_MODE` is set to `true`.
    pub fn debug_mode(&self) -> bool {
        self.file.general.debug.unwrap_or(false)
    }

    pub fn log_timestamp(&self) -> bool {
        self.file.general.log_timestamp.unwrap_or(true)
    }

    pub fn parsed_file(&self) -> &SimpleBackendConfigFile {
        &self.file
    }
}

/// Read config file from current directory.
pub fn get_config(args_config: ServerModeArgs) -> Result<SimpleBackendConfig, GetConfigError> {
    let current_dir = std::env::current_dir().change_context(GetConfigError::GetWorkingDir)?;
    let file_config = file::SimpleBackendConfigFile::load(current_dir)
        .change_context(GetConfigError::LoadFileError)?;
    SimpleBackendConfig::new(file_config, args_config)
}

const DATABASES: DatabaseInfo = DatabaseInfo {
    current: SqliteDatabase { name: "current" },
};

#[derive(Debug, Clone, Copy)]
pub struct DatabaseInfo {
    pub current: SqliteDatabase,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDatabase {
    pub name: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with_debug(debug: Option<bool>) -> SimpleBackendConfigFile {
        let mut file = SimpleBackendConfigFile::minimal_config_for_api_doc_json();
        file.general.debug = debug;
        file
    }

    #[test]
    fn sqlite_in_ram_requires_debug_mode() {
        let args = ServerModeArgs {
            data_dir: None,
            sqlite_in_ram: true,
        };
        assert!(SimpleBackendConfig::new(file_with_debug(None), args).is_err());
    }

    #[test]
    fn sqlite_in_ram_allowed_in_debug_mode() {
        let args = ServerModeArgs {
            data_dir: None,
            sqlite_in_ram: true,
        };
        let config = SimpleBackendConfig::new(file_with_debug(Some(true)), args).unwrap();
        assert!(config.sqlite_in_ram());
        assert!(config.debug_mode());
        assert!(config.log_timestamp());
    }

    #[test]
    fn data_dir_argument_overrides_file() {
        let dir = std::env::temp_dir().join(format!(
            "simple_backend_config_data_dir_{}",
            std::process::id()
        ));
        let args = ServerModeArgs {
            data_dir: Some(dir.clone()),
            sqlite_in_ram: false,
        };
        let config = SimpleBackendConfig::new(file_with_debug(None), args).unwrap();
        assert_eq!(config.data_dir(), dir.as_path());
        assert!(dir.is_dir());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
