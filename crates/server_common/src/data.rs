use std::fmt::Debug;

use error_stack::{Context, Report};
use simple_backend_database::{SimpleDatabaseError, diesel_db::DieselDatabaseError};

use crate::result::WrappedReport;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    // Errors which callers can handle
    #[error("Invalid input")]
    Validation,
    #[error("Not found")]
    NotFound,
    #[error("Conflict with the current state")]
    Conflict,
    #[error("Tried to do something that is not allowed")]
    NotAllowed,
    #[error("Content service is unavailable")]
    ContentServiceUnavailable,

    // Other errors
    #[error("Diesel error")]
    Diesel,
    #[error("I/O error")]
    Io,
    #[error("Database initialization error")]
    Init,
    #[error("Content service error")]
    ContentService,
    #[error("Command runner quit too early")]
    CommandRunnerQuit,
    #[error("Server closing in progress")]
    ServerClosingInProgress,
}

/// Convert to DataError and attach more info to current error
pub trait IntoDataError<Ok, Err: Context>: Sized {
    fn into_data_error_without_context(
        self,
    ) -> std::result::Result<Ok, WrappedReport<Report<Err>>>;

    #[track_caller]
    fn into_data_error<T: Debug>(
        self,
        request_context: T,
    ) -> std::result::Result<Ok, WrappedReport<Report<Err>>> {
        self.into_data_error_without_context()
            .map_err(|e| e.attach_printable(format!("{:?}", request_context)))
    }

    #[track_caller]
    fn into_error(self) -> std::result::Result<Ok, WrappedReport<Report<Err>>> {
        self.into_data_error_without_context()
    }
}

impl<Ok> IntoDataError<Ok, DataError> for error_stack::Result<Ok, DieselDatabaseError> {
    #[track_caller]
    fn into_data_error_without_context(
        self,
    ) -> std::result::Result<Ok, WrappedReport<Report<DataError>>> {
        let value = self?;
        Ok(value)
    }
}

impl<Ok> IntoDataError<Ok, DataError> for error_stack::Result<Ok, SimpleDatabaseError> {
    #[track_caller]
    fn into_data_error_without_context(
        self,
    ) -> std::result::Result<Ok, WrappedReport<Report<DataError>>> {
        let value = self?;
        Ok(value)
    }
}

impl<Ok> IntoDataError<Ok, DataError>
    for std::result::Result<Ok, WrappedReport<Report<DataError>>>
{
    #[track_caller]
    fn into_data_error_without_context(
        self,
    ) -> std::result::Result<Ok, WrappedReport<Report<DataError>>> {
        self
    }
}

impl<Ok> IntoDataError<Ok, DataError> for std::result::Result<Ok, TransactionError> {
    #[track_caller]
    fn into_data_error_without_context(
        self,
    ) -> std::result::Result<Ok, WrappedReport<Report<DataError>>> {
        let value = self?;
        Ok(value)
    }
}

/// Error type for code running inside a database transaction.
///
/// Any error rolls back the transaction. The error context is preserved,
/// so for example [DataError::Conflict] reaches the API layer unchanged.
pub struct TransactionError {
    report: Report<DataError>,
}

impl TransactionError {
    pub fn into_report(self) -> Report<DataError> {
        self.report
    }
}

impl Debug for TransactionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.report)
    }
}

impl From<diesel::result::Error> for TransactionError {
    #[track_caller]
    fn from(error: diesel::result::Error) -> Self {
        Self {
            report: Report::from(error).change_context(DataError::Diesel),
        }
    }
}

impl From<Report<DieselDatabaseError>> for TransactionError {
    #[track_caller]
    fn from(error: Report<DieselDatabaseError>) -> Self {
        Self {
            report: error.change_context(DataError::Diesel),
        }
    }
}

impl From<Report<DataError>> for TransactionError {
    fn from(error: Report<DataError>) -> Self {
        Self { report: error }
    }
}

impl From<DataError> for TransactionError {
    #[track_caller]
    fn from(error: DataError) -> Self {
        Self {
            report: error_stack::report!(error),
        }
    }
}

impl From<WrappedReport<Report<DataError>>> for TransactionError {
    fn from(error: WrappedReport<Report<DataError>>) -> Self {
        Self {
            report: error.into_report(),
        }
    }
}

impl From<TransactionError> for WrappedReport<Report<DataError>> {
    fn from(error: TransactionError) -> Self {
        WrappedReport::new(error.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::WrappedContextExt;

    #[test]
    fn transaction_error_keeps_data_error_context() {
        let error: WrappedReport<Report<DataError>> = DataError::Conflict.report();
        let report: WrappedReport<Report<DataError>> = TransactionError::from(error).into();
        assert!(matches!(
            report.into_report().current_context(),
            DataError::Conflict
        ));
    }

    #[test]
    fn diesel_error_becomes_diesel_data_error() {
        let error = TransactionError::from(diesel::result::Error::RollbackTransaction);
        assert!(matches!(
            error.into_report().current_context(),
            DataError::Diesel
        ));
    }
}
