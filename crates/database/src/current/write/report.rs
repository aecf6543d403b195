use diesel::{insert_into, prelude::*, update};
use error_stack::Result;
use model::{MemberId, Report, ReportId, ReportStatus, SubmitReport, UnixTime};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteReport);

impl CurrentWriteReport<'_> {
    pub fn insert_report(
        &mut self,
        reporter: MemberId,
        data: &SubmitReport,
        time: UnixTime,
    ) -> Result<Report, DieselDatabaseError> {
        use crate::schema::report;

        insert_into(report::table)
            .values((
                report::reporter_id.eq(reporter),
                report::content_type.eq(data.content_type),
                report::content_id.eq(data.content_id),
                report::reason.eq(&data.reason),
                report::status.eq(ReportStatus::Pending),
                report::created_unix_time.eq(time),
            ))
            .returning(Report::as_returning())
            .get_result(self.conn())
            .into_db_error(reporter)
    }

    /// Move a PENDING report to a terminal status.
    ///
    /// Returns the number of updated rows. Zero means that the report
    /// does not exist or it is already in a terminal status.
    pub fn mark_terminal(
        &mut self,
        id: ReportId,
        new_status: ReportStatus,
        admin: MemberId,
        action: Option<&str>,
        time: UnixTime,
    ) -> Result<usize, DieselDatabaseError> {
        use crate::schema::report;

        update(
            report::table
                .find(id)
                .filter(report::status.eq(ReportStatus::Pending)),
        )
        .set((
            report::status.eq(new_status),
            report::resolved_unix_time.eq(time),
            report::resolved_by.eq(admin),
            report::action_taken.eq(action),
        ))
        .execute(self.conn())
        .into_db_error((id, new_status))
    }
}
