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

/// Member ID. Surrogate integer key of the member table.
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
    PartialOrd,
    Ord,
    FromSqlRow,
    AsExpression,
)]
#[diesel(sql_type = BigInt)]
pub struct MemberId {
    pub mid: i64,
}

impl MemberId {
    pub fn new(mid: i64) -> Self {
        Self { mid }
    }

    pub fn as_i64(&self) -> &i64 {
        &self.mid
    }
}

diesel_i64_wrapper!(MemberId);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mid)
    }
}

/// Role set stored as an integer bit set.
///
/// - const MEMBER = 0x1;
/// - const ADMIN = 0x2;
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, FromSqlRow, AsExpression,
)]
#[diesel(sql_type = BigInt)]
pub struct RoleSetValue(i64);

impl RoleSetValue {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> &i64 {
        &self.0
    }
}

diesel_i64_wrapper!(RoleSetValue);

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RoleFlags: i64 {
        const MEMBER = 0x1;
        const ADMIN = 0x2;
    }
}

impl From<RoleSetValue> for RoleFlags {
    fn from(value: RoleSetValue) -> Self {
        Self::from_bits_truncate(value.0)
    }
}

impl From<RoleFlags> for RoleSetValue {
    fn from(value: RoleFlags) -> Self {
        RoleSetValue(value.bits())
    }
}

/// Member roles for API responses.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct MemberRoles {
    pub member: bool,
    pub admin: bool,
}

impl From<RoleFlags> for MemberRoles {
    fn from(value: RoleFlags) -> Self {
        Self {
            member: value.contains(RoleFlags::MEMBER),
            admin: value.contains(RoleFlags::ADMIN),
        }
    }
}

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
pub enum MemberStatus {
    #[default]
    Active = 0,
    Banned = 1,
}

diesel_i64_try_from!(MemberStatus);

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::member)]
#[diesel(check_for_backend(crate::Db))]
pub struct MemberRaw {
    pub id: MemberId,
    pub name: String,
    pub roles: RoleSetValue,
    pub created_unix_time: UnixTime,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::member_status)]
#[diesel(check_for_backend(crate::Db))]
pub struct MemberStatusRaw {
    pub member_id: MemberId,
    pub status: MemberStatus,
    pub status_change_unix_time: UnixTime,
    pub status_changed_by: Option<MemberId>,
    pub ban_reason: Option<String>,
    pub warning_count: i64,
    pub warning_count_reset_offset: i64,
}

impl MemberStatusRaw {
    /// Warnings which count towards the next automatic ban.
    pub fn warnings_since_reset(&self) -> i64 {
        self.warning_count - self.warning_count_reset_offset
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub roles: MemberRoles,
    pub status: MemberStatus,
    /// Count of all warnings issued to the member.
    pub warning_count: i64,
    pub status_change_time: UnixTime,
    /// None if the status was changed automatically or the member
    /// has never been banned.
    pub status_changed_by: Option<MemberId>,
    pub ban_reason: Option<String>,
}

impl Member {
    pub fn new(member: MemberRaw, status: MemberStatusRaw) -> Self {
        Self {
            id: member.id,
            name: member.name,
            roles: RoleFlags::from(member.roles).into(),
            status: status.status,
            warning_count: status.warning_count,
            status_change_time: status.status_change_unix_time,
            status_changed_by: status.status_changed_by,
            ban_reason: status.ban_reason,
        }
    }
}

/// Trusted identity of the current API caller. Resolved from the access
/// token and the member tables on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: MemberId,
    pub roles: RoleFlags,
    pub status: MemberStatus,
}

impl CallerIdentity {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(RoleFlags::ADMIN)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct OwnMemberStatus {
    pub member: MemberId,
    pub roles: MemberRoles,
    pub status: MemberStatus,
}

impl From<CallerIdentity> for OwnMemberStatus {
    fn from(value: CallerIdentity) -> Self {
        Self {
            member: value.id,
            roles: value.roles.into(),
            status: value.status,
        }
    }
}
