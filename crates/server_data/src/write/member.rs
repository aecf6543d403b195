use error_stack::ResultExt;
use model::{AccessToken, NewMember, NewMemberCredentials, RoleFlags, UnixTime};
use server_common::result::Result;
use tracing::info;

use crate::{DataError, db_transaction, define_cmd_wrapper_write};

define_cmd_wrapper_write!(WriteCommandsMember);

impl WriteCommandsMember<'_> {
    /// Add member to the Member Directory and create an access token
    /// for it.
    pub async fn add_member(&self, data: NewMember) -> Result<NewMemberCredentials, DataError> {
        data.validate().change_context(DataError::Validation)?;

        let roles = if data.admin {
            RoleFlags::MEMBER | RoleFlags::ADMIN
        } else {
            RoleFlags::MEMBER
        };
        let access_token = AccessToken::generate_new();
        let time = UnixTime::current_time();

        let credentials = db_transaction!(self, move |mut cmds| {
            let member = cmds.member().insert_member(&data.name, roles, time)?;
            cmds.token().insert_access_token(member, &access_token)?;
            Ok(NewMemberCredentials {
                member,
                access_token,
            })
        })?;

        info!(
            "Member {} added, admin: {}",
            credentials.member,
            roles.contains(RoleFlags::ADMIN)
        );

        Ok(credentials)
    }
}
