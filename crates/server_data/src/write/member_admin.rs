use error_stack::ResultExt;
use model::{
    ActivateMember, BanMember, MemberId, MemberStatus, MemberStatusChangeResult,
    ReactivationWarningPolicy, UnixTime,
};
use server_common::result::Result;
use tracing::info;

use crate::{DataError, db_transaction, define_cmd_wrapper_write};

define_cmd_wrapper_write!(WriteCommandsMemberAdmin);

impl WriteCommandsMemberAdmin<'_> {
    /// Ban member directly. Banning an already banned member changes
    /// nothing and returns `changed = false`.
    pub async fn ban_member(
        &self,
        admin: MemberId,
        data: BanMember,
    ) -> Result<MemberStatusChangeResult, DataError> {
        data.validate().change_context(DataError::Validation)?;
        let id = data.member;
        let time = UnixTime::current_time();

        let result = db_transaction!(self, move |mut cmds| {
            let current = cmds
                .read()
                .member()
                .member_status(id)?
                .ok_or(DataError::NotFound)?;

            let changed = current.status != MemberStatus::Banned;
            if changed {
                cmds.member().set_status(
                    id,
                    MemberStatus::Banned,
                    Some(admin),
                    Some(data.reason.as_str()),
                    time,
                )?;
            }

            let member = cmds.read().member().member(id)?.ok_or(DataError::NotFound)?;
            Ok(MemberStatusChangeResult { member, changed })
        })?;

        if result.changed {
            info!("Member {} banned by {}", id, admin);
        } else {
            info!("Member {} is already banned, ban by {} ignored", id, admin);
        }

        Ok(result)
    }

    /// Reverse a ban. Activating an already active member changes
    /// nothing and returns `changed = false`.
    pub async fn activate_member(
        &self,
        admin: MemberId,
        data: ActivateMember,
    ) -> Result<MemberStatusChangeResult, DataError> {
        let id = data.member;
        let reset_warnings =
            self.config().reactivation_warning_policy() == ReactivationWarningPolicy::Reset;
        let time = UnixTime::current_time();

        let result = db_transaction!(self, move |mut cmds| {
            let current = cmds
                .read()
                .member()
                .member_status(id)?
                .ok_or(DataError::NotFound)?;

            let changed = current.status != MemberStatus::Active;
            if changed {
                cmds.member()
                    .set_status(id, MemberStatus::Active, Some(admin), None, time)?;
                if reset_warnings {
                    cmds.member()
                        .set_warning_count_reset_offset(id, current.warning_count)?;
                }
            }

            let member = cmds.read().member().member(id)?.ok_or(DataError::NotFound)?;
            Ok(MemberStatusChangeResult { member, changed })
        })?;

        if result.changed {
            info!(
                "Member {} activated by {}, warning count: {}",
                id, admin, result.member.warning_count
            );
        } else {
            info!("Member {} is already active, activation by {} ignored", id, admin);
        }

        Ok(result)
    }
}
