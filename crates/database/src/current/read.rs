use self::{
    member::CurrentReadMember, report::CurrentReadReport, token::CurrentReadToken,
    warning::CurrentReadWarning,
};
use crate::DieselConnection;

pub mod member;
pub mod report;
pub mod token;
pub mod warning;

pub struct CurrentSyncReadCommands<'a> {
    conn: &'a mut DieselConnection,
}

impl<'a> CurrentSyncReadCommands<'a> {
    pub fn new(conn: &'a mut DieselConnection) -> Self {
        Self { conn }
    }

    pub fn member(&mut self) -> CurrentReadMember<'_> {
        CurrentReadMember::new(self.conn)
    }

    pub fn report(&mut self) -> CurrentReadReport<'_> {
        CurrentReadReport::new(self.conn)
    }

    pub fn token(&mut self) -> CurrentReadToken<'_> {
        CurrentReadToken::new(self.conn)
    }

    pub fn warning(&mut self) -> CurrentReadWarning<'_> {
        CurrentReadWarning::new(self.conn)
    }

    pub fn conn(&mut self) -> &mut DieselConnection {
        self.conn
    }
}
