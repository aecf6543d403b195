use self::{
    member::ReadCommandsMember, report::ReadCommandsReport, token::ReadCommandsToken,
    warning::ReadCommandsWarning,
};
use crate::db_manager::RouterDatabaseReadHandle;

pub mod member;
pub mod report;
pub mod token;
pub mod warning;

pub struct ReadCommands<'a> {
    handle: &'a RouterDatabaseReadHandle,
}

impl<'a> ReadCommands<'a> {
    pub fn new(handle: &'a RouterDatabaseReadHandle) -> Self {
        Self { handle }
    }

    pub fn member(&self) -> ReadCommandsMember<'a> {
        ReadCommandsMember::new(self.handle)
    }

    pub fn report(&self) -> ReadCommandsReport<'a> {
        ReadCommandsReport::new(self.handle)
    }

    pub fn token(&self) -> ReadCommandsToken<'a> {
        ReadCommandsToken::new(self.handle)
    }

    pub fn warning(&self) -> ReadCommandsWarning<'a> {
        ReadCommandsWarning::new(self.handle)
    }
}
