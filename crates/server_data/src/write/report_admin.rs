use error_stack::ResultExt;
use model::{
    ContentRemoval, DismissReport, MemberId, Report, ReportId, ReportStatus, ResolveReport,
    UnixTime,
};
use server_common::result::{Result, WrappedContextExt};
use tracing::{info, warn};

use crate::{DataError, IntoDataError, db_transaction, define_cmd_wrapper_write};

define_cmd_wrapper_write!(WriteCommandsReportAdmin);

impl WriteCommandsReportAdmin<'_> {
    /// Resolve a PENDING report and remove the reported content.
    ///
    /// The content is removed before the report is marked resolved, so
    /// a content service failure leaves the report PENDING. Other writes
    /// wait for the removal request to finish or time out.
    pub async fn resolve_report(
        &self,
        admin: MemberId,
        data: ResolveReport,
    ) -> Result<Report, DataError> {
        data.validate().change_context(DataError::Validation)?;
        let id = data.report;

        let report = self.pending_report(id).await?;

        let removal = self
            .content_service()
            .remove_content(report.content())
            .await
            .inspect_err(|e| warn!("Content removal failed for report {}: {:?}", id, e))
            .change_context(DataError::ContentServiceUnavailable)?;
        if removal == ContentRemoval::AlreadyRemoved {
            info!("Content of report {} was already removed", id);
        }

        let report = self
            .mark_terminal(id, admin, ReportStatus::Resolved, Some(data.action_taken))
            .await?;

        info!("Report {} resolved by {}", id, admin);
        Ok(report)
    }

    pub async fn dismiss_report(
        &self,
        admin: MemberId,
        data: DismissReport,
    ) -> Result<Report, DataError> {
        let id = data.report;
        self.pending_report(id).await?;

        let report = self
            .mark_terminal(id, admin, ReportStatus::Dismissed, None)
            .await?;

        info!("Report {} dismissed by {}", id, admin);
        Ok(report)
    }

    async fn pending_report(&self, id: ReportId) -> Result<Report, DataError> {
        let report = self
            .db_read(move |mut cmds| cmds.report().report(id))
            .await
            .into_error()?
            .ok_or_else(|| DataError::NotFound.report())?;

        if report.status.is_terminal() {
            return Err(DataError::Conflict.report());
        }

        Ok(report)
    }

    async fn mark_terminal(
        &self,
        id: ReportId,
        admin: MemberId,
        status: ReportStatus,
        action_taken: Option<String>,
    ) -> Result<Report, DataError> {
        let time = UnixTime::current_time();

        db_transaction!(self, move |mut cmds| {
            let updated = cmds.report().mark_terminal(
                id,
                status,
                admin,
                action_taken.as_deref(),
                time,
            )?;

            let report = cmds.read().report().report(id)?.ok_or(DataError::NotFound)?;
            if updated == 0 {
                return Err(DataError::Conflict.into());
            }

            Ok(report)
        })
    }
}
