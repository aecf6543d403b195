use diesel::{
    Selectable,
    deserialize::{FromSqlRow, Queryable},
    expression::AsExpression,
    sql_types::BigInt,
};
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use simple_backend_model::{UnixTime, diesel_i64_try_from, diesel_i64_wrapper};
use utoipa::{IntoParams, ToSchema};

use crate::{ContentRef, InputValidationError, MemberId, is_blank};

#[derive(
    Debug,
    Clone,
    Copy,
    Deserialize,
    Serialize,
    ToSchema,
    IntoParams,
    PartialEq,
    Eq,
    Hash,
    FromSqlRow,
    AsExpression,
)]
#[diesel(sql_type = BigInt)]
pub struct ReportId {
    pub rid: i64,
}

impl ReportId {
    pub fn new(rid: i64) -> Self {
        Self { rid }
    }

    pub fn as_i64(&self) -> &i64 {
        &self.rid
    }
}

diesel_i64_wrapper!(ReportId);

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rid)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Deserialize,
    Serialize,
    ToSchema,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    FromSqlRow,
    AsExpression,
)]
#[diesel(sql_type = BigInt)]
#[repr(i64)]
pub enum ContentType {
    Thread = 0,
    Comment = 1,
}

diesel_i64_try_from!(ContentType);

/// Report state machine. `Resolved` and `Dismissed` are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Deserialize,
    Serialize,
    ToSchema,
    PartialEq,
    Eq,
    TryFromPrimitive,
    FromSqlRow,
    AsExpression,
)]
#[diesel(sql_type = BigInt)]
#[repr(i64)]
pub enum ReportStatus {
    #[default]
    Pending = 0,
    Resolved = 1,
    Dismissed = 2,
}

diesel_i64_try_from!(ReportStatus);

impl ReportStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::report)]
#[diesel(check_for_backend(crate::Db))]
pub struct Report {
    pub id: ReportId,
    #[diesel(column_name = reporter_id)]
    pub reporter: MemberId,
    pub content_type: ContentType,
    pub content_id: i64,
    pub reason: String,
    pub status: ReportStatus,
    #[diesel(column_name = created_unix_time)]
    pub created_at: UnixTime,
    #[diesel(column_name = resolved_unix_time)]
    pub resolved_at: Option<UnixTime>,
    pub resolved_by: Option<MemberId>,
    pub action_taken: Option<String>,
}

impl Report {
    pub fn content(&self) -> ContentRef {
        ContentRef {
            content_type: self.content_type,
            content_id: self.content_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct SubmitReport {
    pub content_type: ContentType,
    pub content_id: i64,
    pub reason: String,
}

impl SubmitReport {
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if is_blank(&self.reason) {
            return Err(InputValidationError::EmptyReason);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct ResolveReport {
    pub report: ReportId,
    pub action_taken: String,
}

impl ResolveReport {
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if is_blank(&self.action_taken) {
            return Err(InputValidationError::EmptyActionTaken);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct DismissReport {
    pub report: ReportId,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct ReportQueryParams {
    /// Return only reports with this status.
    pub status: Option<ReportStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ReportList {
    /// Newest first
    pub reports: Vec<Report>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reason_is_rejected() {
        let report = SubmitReport {
            content_type: ContentType::Thread,
            content_id: 42,
            reason: " \t\n".to_string(),
        };
        assert!(matches!(
            report.validate(),
            Err(InputValidationError::EmptyReason)
        ));
    }

    #[test]
    fn reason_with_text_is_accepted() {
        let report = SubmitReport {
            content_type: ContentType::Comment,
            content_id: 1,
            reason: "off-topic".to_string(),
        };
        assert!(report.validate().is_ok());
    }

    #[test]
    fn unknown_content_type_does_not_deserialize() {
        let json = r#"{"content_type":"Forum","content_id":1,"reason":"spam"}"#;
        assert!(serde_json::from_str::<SubmitReport>(json).is_err());
    }

    #[test]
    fn only_pending_is_not_terminal() {
        assert!(!ReportStatus::Pending.is_terminal());
        assert!(ReportStatus::Resolved.is_terminal());
        assert!(ReportStatus::Dismissed.is_terminal());
    }
}
