use error_stack::{Context, Report};
use simple_backend_database::{SimpleDatabaseError, diesel_db::DieselDatabaseError};

use crate::data::DataError;

pub type Result<Ok, Err> = std::result::Result<Ok, WrappedReport<Report<Err>>>;

/// A wrapper around `error_stack::Report` that allows automatic
/// type conversions.
pub struct WrappedReport<E> {
    report: E,
}

impl<E> WrappedReport<Report<E>> {
    pub fn new(report: Report<E>) -> Self {
        Self { report }
    }

    #[track_caller]
    pub fn change_context<C: Context>(self, context: C) -> WrappedReport<Report<C>> {
        WrappedReport {
            report: self.report.change_context(context),
        }
    }

    pub fn attach_printable<A: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static>(
        self,
        attachment: A,
    ) -> WrappedReport<Report<E>> {
        WrappedReport {
            report: self.report.attach_printable(attachment),
        }
    }

    pub fn current_context(&self) -> &E
    where
        E: Context,
    {
        self.report.current_context()
    }

    pub fn into_report(self) -> Report<E> {
        self.report
    }
}

impl<E> std::fmt::Debug for WrappedReport<Report<E>> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.report)
    }
}

impl<E> std::fmt::Display for WrappedReport<Report<E>> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.report)
    }
}

impl<C: Context> From<Report<C>> for WrappedReport<Report<C>> {
    #[track_caller]
    fn from(error: Report<C>) -> Self {
        Self { report: error }
    }
}

impl From<Report<DieselDatabaseError>> for WrappedReport<Report<DataError>> {
    #[track_caller]
    fn from(error: Report<DieselDatabaseError>) -> Self {
        Self {
            report: error.change_context(DataError::Diesel),
        }
    }
}

impl From<Report<SimpleDatabaseError>> for WrappedReport<Report<DataError>> {
    #[track_caller]
    fn from(error: Report<SimpleDatabaseError>) -> Self {
        Self {
            report: error.change_context(DataError::Diesel),
        }
    }
}

impl From<std::io::Error> for WrappedReport<Report<DataError>> {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        Self {
            report: Report::from(error).change_context(DataError::Io),
        }
    }
}

/// Convert errors to WrappedReports.
pub trait WrappedContextExt<ReportAndError>: Context + Sized {
    #[track_caller]
    fn report(self) -> ReportAndError;
}

impl<E: Context> WrappedContextExt<WrappedReport<Report<E>>> for E {
    #[track_caller]
    fn report(self) -> WrappedReport<Report<E>> {
        WrappedReport {
            report: error_stack::report!(self),
        }
    }
}
