use diesel::{
    Selectable,
    deserialize::{FromSqlRow, Queryable},
    expression::AsExpression,
    sql_types::BigInt,
};
use serde::{Deserialize, Serialize};
use simple_backend_model::{UnixTime, diesel_i64_wrapper};
use utoipa::ToSchema;

use crate::{ContentRef, ContentType, InputValidationError, MemberId, is_blank};

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
    FromSqlRow,
    AsExpression,
)]
#[diesel(sql_type = BigInt)]
pub struct WarningId {
    pub wid: i64,
}

impl WarningId {
    pub fn new(wid: i64) -> Self {
        Self { wid }
    }

    pub fn as_i64(&self) -> &i64 {
        &self.wid
    }
}

diesel_i64_wrapper!(WarningId);

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::warning)]
#[diesel(check_for_backend(crate::Db))]
pub struct WarningRaw {
    pub id: WarningId,
    pub member_id: MemberId,
    pub issued_by: MemberId,
    pub reason: String,
    pub message: String,
    pub created_unix_time: UnixTime,
    pub content_type: Option<ContentType>,
    pub content_id: Option<i64>,
}

/// Warning is immutable after creation.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct Warning {
    pub id: WarningId,
    pub member: MemberId,
    pub issued_by: MemberId,
    pub reason: String,
    /// Text shown to the warned member.
    pub message: String,
    pub created_at: UnixTime,
    pub content: Option<ContentRef>,
}

impl From<WarningRaw> for Warning {
    fn from(value: WarningRaw) -> Self {
        let content = match (value.content_type, value.content_id) {
            (Some(content_type), Some(content_id)) => Some(ContentRef {
                content_type,
                content_id,
            }),
            _ => None,
        };
        Self {
            id: value.id,
            member: value.member_id,
            issued_by: value.issued_by,
            reason: value.reason,
            message: value.message,
            created_at: value.created_unix_time,
            content,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct IssueWarning {
    pub member: MemberId,
    pub reason: String,
    pub message: String,
    /// Content which triggered the warning.
    pub content: Option<ContentRef>,
}

impl IssueWarning {
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if is_blank(&self.reason) {
            return Err(InputValidationError::EmptyReason);
        }
        if is_blank(&self.message) {
            return Err(InputValidationError::EmptyMessage);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct IssueWarningResult {
    pub warning: Warning,
    /// Count of all warnings of the member including the new warning.
    pub warning_count: i64,
    /// The new warning caused an automatic ban.
    pub automatic_ban: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct WarningList {
    /// Oldest first
    pub warnings: Vec<Warning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(content_type: Option<ContentType>, content_id: Option<i64>) -> WarningRaw {
        WarningRaw {
            id: WarningId::new(1),
            member_id: MemberId::new(2),
            issued_by: MemberId::new(3),
            reason: "spam".to_string(),
            message: "Stop spamming".to_string(),
            created_unix_time: UnixTime::new(100),
            content_type,
            content_id,
        }
    }

    #[test]
    fn content_reference_requires_both_columns() {
        let warning: Warning = raw(Some(ContentType::Comment), Some(7)).into();
        assert_eq!(
            warning.content,
            Some(ContentRef {
                content_type: ContentType::Comment,
                content_id: 7
            })
        );

        let warning: Warning = raw(Some(ContentType::Comment), None).into();
        assert_eq!(warning.content, None);
    }

    #[test]
    fn empty_message_is_rejected() {
        let warning = IssueWarning {
            member: MemberId::new(1),
            reason: "spam".to_string(),
            message: "".to_string(),
            content: None,
        };
        assert_eq!(warning.validate(), Err(InputValidationError::EmptyMessage));
    }
}
