use diesel::prelude::*;
use error_stack::Result;
use model::{MemberId, Warning, WarningRaw};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadWarning);

impl CurrentReadWarning<'_> {
    /// Oldest first
    pub fn warnings_for_member(
        &mut self,
        id: MemberId,
    ) -> Result<Vec<Warning>, DieselDatabaseError> {
        use crate::schema::warning;

        let data: Vec<WarningRaw> = warning::table
            .filter(warning::member_id.eq(id))
            .select(WarningRaw::as_select())
            .order((warning::created_unix_time.asc(), warning::id.asc()))
            .load(self.conn())
            .into_db_error(id)?;

        Ok(data.into_iter().map(Into::into).collect())
    }

    /// Oldest first
    pub fn all_warnings(&mut self) -> Result<Vec<Warning>, DieselDatabaseError> {
        use crate::schema::warning;

        let data: Vec<WarningRaw> = warning::table
            .select(WarningRaw::as_select())
            .order((warning::created_unix_time.asc(), warning::id.asc()))
            .load(self.conn())
            .into_db_error(())?;

        Ok(data.into_iter().map(Into::into).collect())
    }

    /// Count warning rows of the member.
    pub fn warning_count(&mut self, id: MemberId) -> Result<i64, DieselDatabaseError> {
        use crate::schema::warning;

        warning::table
            .filter(warning::member_id.eq(id))
            .count()
            .get_result(self.conn())
            .into_db_error(id)
    }
}
