use error_stack::ResultExt;
use model::{Report, ReportId, ReportStatus, ReportedContent};
use server_common::result::{Result, WrappedContextExt};
use tracing::warn;

use crate::{DataError, IntoDataError, define_cmd_wrapper_read};

define_cmd_wrapper_read!(ReadCommandsReport);

impl ReadCommandsReport<'_> {
    pub async fn report(&self, id: ReportId) -> Result<Report, DataError> {
        self.db_read(move |mut cmds| cmds.report().report(id))
            .await
            .into_error()?
            .ok_or_else(|| DataError::NotFound.report())
    }

    /// Newest first
    pub async fn reports(
        &self,
        status_filter: Option<ReportStatus>,
    ) -> Result<Vec<Report>, DataError> {
        self.db_read(move |mut cmds| cmds.report().reports(status_filter))
            .await
            .into_error()
    }

    /// Fetch the reported content for admin review. Deleted content is
    /// not an error.
    pub async fn reported_content(&self, id: ReportId) -> Result<ReportedContent, DataError> {
        let report = self.report(id).await?;
        let content = report.content();

        let lookup = self
            .content_service()
            .fetch_content(content)
            .await
            .inspect_err(|e| warn!("Content lookup failed for report {}: {:?}", id, e))
            .change_context(DataError::ContentServiceUnavailable)?;

        Ok(lookup.into_reported_content(id, content))
    }
}
