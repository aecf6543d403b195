use diesel::{insert_into, prelude::*};
use error_stack::Result;
use model::{AccessToken, MemberId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteToken);

impl CurrentWriteToken<'_> {
    pub fn insert_access_token(
        &mut self,
        id: MemberId,
        token_value: &AccessToken,
    ) -> Result<(), DieselDatabaseError> {
        use crate::schema::access_token;

        insert_into(access_token::table)
            .values((
                access_token::member_id.eq(id),
                access_token::token.eq(token_value.as_str()),
            ))
            .execute(self.conn())
            .into_db_error(id)?;

        Ok(())
    }
}
