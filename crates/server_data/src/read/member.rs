use model::{Member, MemberId};
use server_common::result::{Result, WrappedContextExt};

use crate::{DataError, IntoDataError, define_cmd_wrapper_read};

define_cmd_wrapper_read!(ReadCommandsMember);

impl ReadCommandsMember<'_> {
    pub async fn member(&self, id: MemberId) -> Result<Member, DataError> {
        self.db_read(move |mut cmds| cmds.member().member(id))
            .await
            .into_error()?
            .ok_or_else(|| DataError::NotFound.report())
    }
}
