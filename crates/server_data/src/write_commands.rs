//! Serialized write command queue.

use std::{future::Future, sync::Arc};

use error_stack::Report;
use server_common::result::Result;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    DataError,
    db_manager::RouterDatabaseWriteHandle,
    write::{
        member::WriteCommandsMember, member_admin::WriteCommandsMemberAdmin,
        report::WriteCommandsReport, report_admin::WriteCommandsReportAdmin,
        warning_admin::WriteCommandsWarningAdmin,
    },
};

/// Write command access given to commands running in the write queue.
pub struct WriteCmds {
    handle: Arc<RouterDatabaseWriteHandle>,
}

impl WriteCmds {
    fn new(handle: Arc<RouterDatabaseWriteHandle>) -> Self {
        Self { handle }
    }

    pub fn member(&self) -> WriteCommandsMember<'_> {
        WriteCommandsMember::new(&self.handle)
    }

    pub fn member_admin(&self) -> WriteCommandsMemberAdmin<'_> {
        WriteCommandsMemberAdmin::new(&self.handle)
    }

    pub fn report(&self) -> WriteCommandsReport<'_> {
        WriteCommandsReport::new(&self.handle)
    }

    pub fn report_admin(&self) -> WriteCommandsReportAdmin<'_> {
        WriteCommandsReportAdmin::new(&self.handle)
    }

    pub fn warning_admin(&self) -> WriteCommandsWarningAdmin<'_> {
        WriteCommandsWarningAdmin::new(&self.handle)
    }
}

/// Runs write commands one at a time.
///
/// Each command runs in its own task, so a command completes even if
/// the caller is dropped (for example when an HTTP client disconnects).
#[derive(Debug, Clone)]
pub struct WriteCommandRunnerHandle {
    handle: Arc<RouterDatabaseWriteHandle>,
    queue: Arc<Mutex<()>>,
}

impl WriteCommandRunnerHandle {
    pub fn new(handle: RouterDatabaseWriteHandle) -> Self {
        Self {
            handle: Arc::new(handle),
            queue: Arc::new(Mutex::new(())),
        }
    }

    pub async fn write<
        CmdResult: Send + 'static,
        Cmd: Future<Output = Result<CmdResult, DataError>> + Send + 'static,
        GetCmd: FnOnce(WriteCmds) -> Cmd + Send + 'static,
    >(
        &self,
        cmd: GetCmd,
    ) -> Result<CmdResult, DataError> {
        let queue_slot = self.queue.clone().lock_owned().await;
        let cmds = WriteCmds::new(self.handle.clone());

        let task = tokio::spawn(async move {
            let result = cmd(cmds).await;
            drop(queue_slot);
            result
        });

        match task.await {
            Ok(result) => result,
            Err(e) => Err(Report::from(e)
                .change_context(DataError::CommandRunnerQuit)
                .into()),
        }
    }

    /// Wait until the currently running write command completes.
    /// New commands can not start while the returned guard exists.
    pub async fn wait_running_writes(&self) -> tokio::sync::OwnedMutexGuard<()> {
        let guard = self.queue.clone().lock_owned().await;
        info!("Write command queue is empty");
        guard
    }
}
