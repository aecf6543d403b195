use model::{AccessToken, CallerIdentity};
use server_common::result::Result;

use crate::{DataError, IntoDataError, define_cmd_wrapper_read};

define_cmd_wrapper_read!(ReadCommandsToken);

impl ReadCommandsToken<'_> {
    /// Returns None if the token is unknown.
    pub async fn caller_identity(
        &self,
        token: AccessToken,
    ) -> Result<Option<CallerIdentity>, DataError> {
        self.db_read(move |mut cmds| cmds.token().caller_identity(&token))
            .await
            .into_error()
    }
}
