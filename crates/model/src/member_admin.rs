use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{AccessToken, InputValidationError, Member, MemberId, is_blank};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct BanMember {
    pub member: MemberId,
    pub reason: String,
}

impl BanMember {
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if is_blank(&self.reason) {
            return Err(InputValidationError::EmptyReason);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct ActivateMember {
    pub member: MemberId,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct MemberStatusChangeResult {
    pub member: Member,
    /// False if the member already had the requested status.
    pub changed: bool,
}

/// Member Directory bootstrap data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub admin: bool,
}

impl NewMember {
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if is_blank(&self.name) {
            return Err(InputValidationError::EmptyName);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemberCredentials {
    pub member: MemberId,
    pub access_token: AccessToken,
}
