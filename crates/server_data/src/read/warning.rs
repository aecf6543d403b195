use model::{MemberId, Warning};
use server_common::result::{Result, WrappedContextExt};

use crate::{DataError, IntoDataError, define_cmd_wrapper_read};

define_cmd_wrapper_read!(ReadCommandsWarning);

impl ReadCommandsWarning<'_> {
    /// Oldest first
    pub async fn warnings_for_member(&self, id: MemberId) -> Result<Vec<Warning>, DataError> {
        self.db_read(move |mut cmds| {
            if cmds.member().member_exists(id)? {
                cmds.warning().warnings_for_member(id).map(Some)
            } else {
                Ok(None)
            }
        })
        .await
        .into_error()?
        .ok_or_else(|| DataError::NotFound.report())
    }

    /// Oldest first
    pub async fn all_warnings(&self) -> Result<Vec<Warning>, DataError> {
        self.db_read(move |mut cmds| cmds.warning().all_warnings())
            .await
            .into_error()
    }
}
