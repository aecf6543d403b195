use diesel::prelude::*;
use error_stack::Result;
use model::{ContentRef, MemberId, Report, ReportId, ReportStatus};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadReport);

impl CurrentReadReport<'_> {
    pub fn report(&mut self, id: ReportId) -> Result<Option<Report>, DieselDatabaseError> {
        use crate::schema::report;

        report::table
            .find(id)
            .select(Report::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)
    }

    /// Newest first. Reports created during the same second are ordered
    /// by descending ID.
    pub fn reports(
        &mut self,
        status_filter: Option<ReportStatus>,
    ) -> Result<Vec<Report>, DieselDatabaseError> {
        use crate::schema::report;

        let mut query = report::table.select(Report::as_select()).into_boxed();
        if let Some(status_filter) = status_filter {
            query = query.filter(report::status.eq(status_filter));
        }

        query
            .order((report::created_unix_time.desc(), report::id.desc()))
            .load(self.conn())
            .into_db_error(status_filter)
    }

    pub fn pending_report_for_content(
        &mut self,
        reporter: MemberId,
        content: ContentRef,
    ) -> Result<Option<Report>, DieselDatabaseError> {
        use crate::schema::report;

        report::table
            .filter(report::reporter_id.eq(reporter))
            .filter(report::content_type.eq(content.content_type))
            .filter(report::content_id.eq(content.content_id))
            .filter(report::status.eq(ReportStatus::Pending))
            .select(Report::as_select())
            .order(report::id.asc())
            .first(self.conn())
            .optional()
            .into_db_error((reporter, content))
    }
}
