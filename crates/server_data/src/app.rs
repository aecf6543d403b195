use std::future::Future;

use config::Config;

use crate::{
    DataError, read::ReadCommands, result::Result, write_commands::WriteCmds,
};

pub trait WriteData {
    fn write<
        CmdResult: Send + 'static,
        Cmd: Future<Output = Result<CmdResult, DataError>> + Send + 'static,
        GetCmd: FnOnce(WriteCmds) -> Cmd + Send + 'static,
    >(
        &self,
        cmd: GetCmd,
    ) -> impl Future<Output = Result<CmdResult, DataError>> + Send;
}

pub trait ReadData {
    fn read(&self) -> ReadCommands<'_>;
}

pub trait GetConfig {
    fn config(&self) -> &Config;
}
