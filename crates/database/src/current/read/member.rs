use diesel::prelude::*;
use error_stack::Result;
use model::{Member, MemberId, MemberRaw, MemberStatusRaw};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadMember);

impl CurrentReadMember<'_> {
    pub fn member(&mut self, id: MemberId) -> Result<Option<Member>, DieselDatabaseError> {
        use crate::schema::{member, member_status};

        let data = member::table
            .inner_join(member_status::table)
            .filter(member::id.eq(id))
            .select((MemberRaw::as_select(), MemberStatusRaw::as_select()))
            .first::<(MemberRaw, MemberStatusRaw)>(self.conn())
            .optional()
            .into_db_error(id)?
            .map(|(member, status)| Member::new(member, status));

        Ok(data)
    }

    pub fn member_status(
        &mut self,
        id: MemberId,
    ) -> Result<Option<MemberStatusRaw>, DieselDatabaseError> {
        use crate::schema::member_status;

        member_status::table
            .filter(member_status::member_id.eq(id))
            .select(MemberStatusRaw::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)
    }

    pub fn member_exists(&mut self, id: MemberId) -> Result<bool, DieselDatabaseError> {
        use crate::schema::member;

        diesel::select(diesel::dsl::exists(member::table.filter(member::id.eq(id))))
            .get_result(self.conn())
            .into_db_error(id)
    }
}
