use std::{future::Future, sync::Arc};

use config::Config;
use model::{AccessToken, CallerIdentity};
use server_api::{
    DataError,
    app::{GetAccessTokens, GetConfig, ReadData, StateBase, WriteData},
    result::Result,
};
use server_data::{
    db_manager::RouterDatabaseReadHandle,
    read::ReadCommands,
    write_commands::{WriteCmds, WriteCommandRunnerHandle},
};

pub mod routes_connected;

/// State type for route handlers.
pub type S = AppState;

#[derive(Clone)]
pub struct AppState {
    database: Arc<RouterDatabaseReadHandle>,
    write_queue: WriteCommandRunnerHandle,
    config: Arc<Config>,
}

impl AppState {
    pub fn create_app_state(
        database_handle: RouterDatabaseReadHandle,
        write_queue: WriteCommandRunnerHandle,
        config: Arc<Config>,
    ) -> AppState {
        AppState {
            database: Arc::new(database_handle),
            write_queue,
            config,
        }
    }
}

impl StateBase for AppState {}

impl GetConfig for AppState {
    fn config(&self) -> &Config {
        &self.config
    }
}

impl ReadData for AppState {
    fn read(&self) -> ReadCommands<'_> {
        self.database.read()
    }
}

impl WriteData for AppState {
    async fn write<
        CmdResult: Send + 'static,
        Cmd: Future<Output = Result<CmdResult, DataError>> + Send + 'static,
        GetCmd: FnOnce(WriteCmds) -> Cmd + Send + 'static,
    >(
        &self,
        cmd: GetCmd,
    ) -> Result<CmdResult, DataError> {
        self.write_queue.write(cmd).await
    }
}

impl GetAccessTokens for AppState {
    async fn caller_identity(
        &self,
        token: AccessToken,
    ) -> Result<Option<CallerIdentity>, DataError> {
        self.database.read().token().caller_identity(token).await
    }
}
