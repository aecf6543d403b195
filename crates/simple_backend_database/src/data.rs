use std::{fs, path::PathBuf};

use error_stack::{Result, ResultExt};
use simple_backend_config::{SimpleBackendConfig, SqliteDatabase};

use crate::SimpleDatabaseError;

pub const SQLITE_DIR_NAME: &str = "sqlite";

/// Returns `data_dir/sqlite/{name}/{name}.db` and creates
/// the missing directories.
pub fn create_dirs_and_get_sqlite_database_file_path(
    config: &SimpleBackendConfig,
    database_info: &SqliteDatabase,
) -> Result<PathBuf, SimpleDatabaseError> {
    let root = config.data_dir().to_path_buf();
    if !root.exists() {
        fs::create_dir(&root).change_context(SimpleDatabaseError::FilePathCreationFailed)?;
    }

    let sqlite = root.join(SQLITE_DIR_NAME);
    if !sqlite.exists() {
        fs::create_dir(&sqlite).change_context(SimpleDatabaseError::FilePathCreationFailed)?;
    }

    let db_dir = sqlite.join(database_info.name);
    if !db_dir.exists() {
        fs::create_dir(&db_dir).change_context(SimpleDatabaseError::FilePathCreationFailed)?;
    }

    Ok(db_dir.join(format!("{}.db", database_info.name)))
}
