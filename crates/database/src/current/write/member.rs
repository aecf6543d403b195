use diesel::{insert_into, prelude::*, update};
use error_stack::Result;
use model::{MemberId, MemberStatus, RoleFlags, RoleSetValue, UnixTime};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteMember);

impl CurrentWriteMember<'_> {
    /// Insert member and its ACTIVE status row.
    pub fn insert_member(
        &mut self,
        member_name: &str,
        member_roles: RoleFlags,
        time: UnixTime,
    ) -> Result<MemberId, DieselDatabaseError> {
        use crate::schema::{member, member_status};

        let id: MemberId = insert_into(member::table)
            .values((
                member::name.eq(member_name),
                member::roles.eq(RoleSetValue::from(member_roles)),
                member::created_unix_time.eq(time),
            ))
            .returning(member::id)
            .get_result(self.conn())
            .into_db_error(member_name)?;

        insert_into(member_status::table)
            .values((
                member_status::member_id.eq(id),
                member_status::status.eq(MemberStatus::Active),
                member_status::status_change_unix_time.eq(time),
            ))
            .execute(self.conn())
            .into_db_error(id)?;

        Ok(id)
    }

    /// Set status and the related ban info. `changed_by` is None for
    /// automatic changes.
    pub fn set_status(
        &mut self,
        id: MemberId,
        new_status: MemberStatus,
        changed_by: Option<MemberId>,
        reason: Option<&str>,
        time: UnixTime,
    ) -> Result<(), DieselDatabaseError> {
        use crate::schema::member_status;

        update(member_status::table.find(id))
            .set((
                member_status::status.eq(new_status),
                member_status::status_change_unix_time.eq(time),
                member_status::status_changed_by.eq(changed_by),
                member_status::ban_reason.eq(reason),
            ))
            .execute(self.conn())
            .into_db_error((id, new_status))?;

        Ok(())
    }

    pub fn set_warning_count(
        &mut self,
        id: MemberId,
        count: i64,
    ) -> Result<(), DieselDatabaseError> {
        use crate::schema::member_status;

        update(member_status::table.find(id))
            .set(member_status::warning_count.eq(count))
            .execute(self.conn())
            .into_db_error((id, count))?;

        Ok(())
    }

    /// Escalation ignores warnings up to this count.
    pub fn set_warning_count_reset_offset(
        &mut self,
        id: MemberId,
        offset: i64,
    ) -> Result<(), DieselDatabaseError> {
        use crate::schema::member_status;

        update(member_status::table.find(id))
            .set(member_status::warning_count_reset_offset.eq(offset))
            .execute(self.conn())
            .into_db_error((id, offset))?;

        Ok(())
    }
}
