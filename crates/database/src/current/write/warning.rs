use diesel::{insert_into, prelude::*};
use error_stack::Result;
use model::{IssueWarning, MemberId, UnixTime, WarningRaw};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteWarning);

impl CurrentWriteWarning<'_> {
    pub fn insert_warning(
        &mut self,
        data: &IssueWarning,
        admin: MemberId,
        time: UnixTime,
    ) -> Result<WarningRaw, DieselDatabaseError> {
        use crate::schema::warning;

        insert_into(warning::table)
            .values((
                warning::member_id.eq(data.member),
                warning::issued_by.eq(admin),
                warning::reason.eq(&data.reason),
                warning::message.eq(&data.message),
                warning::created_unix_time.eq(time),
                warning::content_type.eq(data.content.map(|c| c.content_type)),
                warning::content_id.eq(data.content.map(|c| c.content_id)),
            ))
            .returning(WarningRaw::as_returning())
            .get_result(self.conn())
            .into_db_error(data.member)
    }
}
