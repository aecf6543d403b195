use diesel::prelude::*;
use error_stack::Result;
use model::{AccessToken, CallerIdentity, MemberId, MemberStatus, RoleSetValue};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadToken);

impl CurrentReadToken<'_> {
    /// Resolve access token to the current roles and status of its owner.
    pub fn caller_identity(
        &mut self,
        token_value: &AccessToken,
    ) -> Result<Option<CallerIdentity>, DieselDatabaseError> {
        use crate::schema::{access_token, member, member_status};

        let data = access_token::table
            .inner_join(member::table)
            .inner_join(member_status::table.on(member_status::member_id.eq(access_token::member_id)))
            .filter(access_token::token.eq(token_value.as_str()))
            .select((member::id, member::roles, member_status::status))
            .first::<(MemberId, RoleSetValue, MemberStatus)>(self.conn())
            .optional()
            .into_db_error(())?
            .map(|(id, roles, status)| CallerIdentity {
                id,
                roles: roles.into(),
                status,
            });

        Ok(data)
    }

    pub fn access_token(
        &mut self,
        id: MemberId,
    ) -> Result<Option<AccessToken>, DieselDatabaseError> {
        use crate::schema::access_token;

        let data = access_token::table
            .filter(access_token::member_id.eq(id))
            .select(access_token::token)
            .first::<String>(self.conn())
            .optional()
            .into_db_error(id)?
            .map(AccessToken::new);

        Ok(data)
    }
}
