use error_stack::ResultExt;
use model::{ContentRef, DuplicateReportPolicy, MemberId, Report, SubmitReport, UnixTime};
use server_common::result::Result;
use tracing::info;

use crate::{DataError, db_transaction, define_cmd_wrapper_write};

define_cmd_wrapper_write!(WriteCommandsReport);

impl WriteCommandsReport<'_> {
    /// Create a new PENDING report. The referenced content is not checked.
    pub async fn submit_report(
        &self,
        reporter: MemberId,
        data: SubmitReport,
    ) -> Result<Report, DataError> {
        data.validate().change_context(DataError::Validation)?;
        let return_existing =
            self.config().duplicate_report_policy() == DuplicateReportPolicy::ReturnExisting;
        let time = UnixTime::current_time();

        let (report, created) = db_transaction!(self, move |mut cmds| {
            let content = ContentRef {
                content_type: data.content_type,
                content_id: data.content_id,
            };
            if return_existing {
                let existing = cmds
                    .read()
                    .report()
                    .pending_report_for_content(reporter, content)?;
                if let Some(existing) = existing {
                    return Ok((existing, false));
                }
            }

            let report = cmds.report().insert_report(reporter, &data, time)?;
            Ok((report, true))
        })?;

        if created {
            info!(
                "Report {} created by {} for {:?} {}",
                report.id, reporter, report.content_type, report.content_id
            );
        } else {
            info!(
                "Member {} already has pending report {} for the content",
                reporter, report.id
            );
        }

        Ok(report)
    }
}
