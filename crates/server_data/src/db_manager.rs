use std::{fmt, sync::Arc};

use config::Config;
use database::{
    DIESEL_MIGRATIONS,
    current::{read::CurrentSyncReadCommands, write::CurrentSyncWriteCommands},
};
use diesel::Connection;
use error_stack::ResultExt;
use server_common::{
    data::{DataError, TransactionError},
    result::Result,
};
use simple_backend_database::{
    DatabaseHandleCreator, DbReadCloseHandle, DbReadHandle, DbWriteCloseHandle, DbWriteHandle,
    diesel_db::{DieselDatabaseError, ObjectExtensions},
};
use tracing::info;

use crate::{content::ContentService, read::ReadCommands};

/// Closes database connections when the server quits.
pub struct DatabaseManager {
    current_write_close: DbWriteCloseHandle,
    current_read_close: DbReadCloseHandle,
}

impl DatabaseManager {
    /// Runs also migrations.
    pub async fn new(
        config: Arc<Config>,
        content_service: Arc<dyn ContentService>,
    ) -> Result<(Self, RouterDatabaseReadHandle, RouterDatabaseWriteHandle), DataError> {
        info!("Opening database");

        let simple_backend_config = config.simple_backend().clone();
        let current_db = simple_backend_config.databases().current;

        let (current_write_handle, current_write_close) =
            DatabaseHandleCreator::create_write_handle_from_config(
                &simple_backend_config,
                &current_db,
                DIESEL_MIGRATIONS,
            )
            .await
            .change_context(DataError::Init)?;

        let sqlite_version = current_write_handle
            .diesel()
            .sqlite_version()
            .await
            .change_context(DataError::Init)?;
        info!("SQLite version: {}", sqlite_version);

        let (current_read_handle, current_read_close) =
            DatabaseHandleCreator::create_read_handle_from_config(
                &simple_backend_config,
                &current_db,
            )
            .await
            .change_context(DataError::Init)?;

        let manager = DatabaseManager {
            current_write_close,
            current_read_close,
        };

        let read = RouterDatabaseReadHandle {
            config: config.clone(),
            current_read_handle: current_read_handle.clone(),
            content_service: content_service.clone(),
        };

        let write = RouterDatabaseWriteHandle {
            config,
            current_write_handle,
            current_read_handle,
            content_service,
        };

        info!("Database opening completed");

        Ok((manager, read, write))
    }

    pub async fn close(self) {
        self.current_read_close.close().await;
        self.current_write_close.close().await;
        info!("Database closed");
    }
}

#[derive(Clone)]
pub struct RouterDatabaseReadHandle {
    config: Arc<Config>,
    current_read_handle: DbReadHandle,
    content_service: Arc<dyn ContentService>,
}

impl fmt::Debug for RouterDatabaseReadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterDatabaseReadHandle").finish()
    }
}

impl RouterDatabaseReadHandle {
    pub fn read(&self) -> ReadCommands<'_> {
        ReadCommands::new(self)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn content_service(&self) -> &dyn ContentService {
        self.content_service.as_ref()
    }

    pub(crate) fn reader(&self) -> DbReader<'_> {
        DbReader::new(&self.current_read_handle)
    }
}

pub struct RouterDatabaseWriteHandle {
    config: Arc<Config>,
    current_write_handle: DbWriteHandle,
    current_read_handle: DbReadHandle,
    content_service: Arc<dyn ContentService>,
}

impl fmt::Debug for RouterDatabaseWriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterDatabaseWriteHandle").finish()
    }
}

impl RouterDatabaseWriteHandle {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn content_service(&self) -> &dyn ContentService {
        self.content_service.as_ref()
    }

    pub(crate) fn writer(&self) -> DbWriter<'_> {
        DbWriter::new(&self.current_write_handle)
    }

    pub(crate) fn reader(&self) -> DbReader<'_> {
        DbReader::new(&self.current_read_handle)
    }
}

/// Runs read commands using a connection from the read pool.
pub struct DbReader<'a> {
    handle: &'a DbReadHandle,
}

impl<'a> DbReader<'a> {
    pub fn new(handle: &'a DbReadHandle) -> Self {
        Self { handle }
    }

    pub async fn db_read<
        T: FnOnce(CurrentSyncReadCommands<'_>) -> error_stack::Result<R, DieselDatabaseError>
            + Send
            + 'static,
        R: Send + 'static,
    >(
        &self,
        cmd: T,
    ) -> error_stack::Result<R, DieselDatabaseError> {
        let conn = self
            .handle
            .diesel()
            .pool()
            .get()
            .await
            .change_context(DieselDatabaseError::GetConnection)?;

        conn.interact(move |conn| cmd(CurrentSyncReadCommands::new(conn)))
            .await?
    }
}

/// Runs write commands inside a transaction using the write connection.
pub struct DbWriter<'a> {
    handle: &'a DbWriteHandle,
}

impl<'a> DbWriter<'a> {
    pub fn new(handle: &'a DbWriteHandle) -> Self {
        Self { handle }
    }

    /// Any error rolls back the transaction.
    pub async fn db_transaction<
        T: FnOnce(CurrentSyncWriteCommands<'_>) -> std::result::Result<R, TransactionError>
            + Send
            + 'static,
        R: Send + 'static,
    >(
        &self,
        cmd: T,
    ) -> std::result::Result<R, TransactionError> {
        let conn = self
            .handle
            .diesel()
            .pool()
            .get()
            .await
            .change_context(DieselDatabaseError::GetConnection)?;

        conn.interact(move |conn| {
            conn.transaction(|conn| cmd(CurrentSyncWriteCommands::new(conn)))
        })
        .await?
    }
}
