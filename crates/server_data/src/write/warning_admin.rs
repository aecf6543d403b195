use error_stack::ResultExt;
use model::{
    EscalationDecision, IssueWarning, IssueWarningResult, MemberId, MemberStatus, UnixTime,
};
use server_common::result::Result;
use tracing::info;

use crate::{DataError, db_transaction, define_cmd_wrapper_write};

define_cmd_wrapper_write!(WriteCommandsWarningAdmin);

impl WriteCommandsWarningAdmin<'_> {
    /// Record a warning, update the warning count and apply the
    /// escalation policy in one transaction.
    ///
    /// Warning a BANNED member is a conflict.
    pub async fn issue_warning(
        &self,
        admin: MemberId,
        data: IssueWarning,
    ) -> Result<IssueWarningResult, DataError> {
        data.validate().change_context(DataError::Validation)?;
        let id = data.member;
        let policy = self.config().escalation_policy();
        let time = UnixTime::current_time();

        let result = db_transaction!(self, move |mut cmds| {
            let current = cmds
                .read()
                .member()
                .member_status(id)?
                .ok_or(DataError::NotFound)?;
            if current.status == MemberStatus::Banned {
                return Err(DataError::Conflict.into());
            }

            let warning = cmds.warning().insert_warning(&data, admin, time)?;
            let warning_count = cmds.read().warning().warning_count(id)?;
            cmds.member().set_warning_count(id, warning_count)?;

            let counted = warning_count - current.warning_count_reset_offset;
            let automatic_ban = match policy.decide(counted) {
                EscalationDecision::RequireBan => {
                    cmds.member().set_status(
                        id,
                        MemberStatus::Banned,
                        None,
                        Some(policy.automatic_ban_reason().as_str()),
                        time,
                    )?;
                    true
                }
                EscalationDecision::RequireNoChange => false,
            };

            Ok(IssueWarningResult {
                warning: warning.into(),
                warning_count,
                automatic_ban,
            })
        })?;

        info!(
            "Warning {} issued to {} by {}, warning count: {}",
            result.warning.id.wid, id, admin, result.warning_count
        );
        if result.automatic_ban {
            info!(
                "Member {} banned automatically, warning count: {}",
                id, result.warning_count
            );
        }

        Ok(result)
    }
}
