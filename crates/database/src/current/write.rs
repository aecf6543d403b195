use self::{
    member::CurrentWriteMember, report::CurrentWriteReport, token::CurrentWriteToken,
    warning::CurrentWriteWarning,
};
use crate::{DieselConnection, current::read::CurrentSyncReadCommands};

pub mod member;
pub mod report;
pub mod token;
pub mod warning;

pub struct CurrentSyncWriteCommands<'a> {
    conn: &'a mut DieselConnection,
}

impl<'a> CurrentSyncWriteCommands<'a> {
    pub fn new(conn: &'a mut DieselConnection) -> Self {
        Self { conn }
    }

    pub fn member(&mut self) -> CurrentWriteMember<'_> {
        CurrentWriteMember::new(self.conn)
    }

    pub fn report(&mut self) -> CurrentWriteReport<'_> {
        CurrentWriteReport::new(self.conn)
    }

    pub fn token(&mut self) -> CurrentWriteToken<'_> {
        CurrentWriteToken::new(self.conn)
    }

    pub fn warning(&mut self) -> CurrentWriteWarning<'_> {
        CurrentWriteWarning::new(self.conn)
    }

    pub fn read(&mut self) -> CurrentSyncReadCommands<'_> {
        CurrentSyncReadCommands::new(self.conn)
    }

    pub fn conn(&mut self) -> &mut DieselConnection {
        self.conn
    }
}
