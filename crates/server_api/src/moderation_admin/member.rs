use axum::extract::{Path, State};
use model::{ActivateMember, BanMember, Member, MemberId, MemberStatusChangeResult};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::{ReadData, StateBase, WriteData},
    create_open_api_router, db_write,
    utils::{AdminCaller, Json, StatusCode},
};

const PATH_GET_MEMBER: &str = "/moderation_api/admin/member/{mid}";

#[utoipa::path(
    get,
    path = PATH_GET_MEMBER,
    params(MemberId),
    responses(
        (status = 200, description = "Successful.", body = Member),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 404, description = "Member does not exist."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn get_member<S: ReadData>(
    State(state): State<S>,
    AdminCaller(_admin): AdminCaller,
    Path(member): Path<MemberId>,
) -> Result<Json<Member>, StatusCode> {
    let member = state.read().member().member(member).await?;
    Ok(member.into())
}

const PATH_POST_BAN_MEMBER: &str = "/moderation_api/admin/ban_member";

/// Ban a member.
///
/// Banning a banned member succeeds with `changed = false`.
/// The warning count is not modified.
#[utoipa::path(
    post,
    path = PATH_POST_BAN_MEMBER,
    request_body = BanMember,
    responses(
        (status = 200, description = "Successful.", body = MemberStatusChangeResult),
        (status = 400, description = "Empty reason."),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 404, description = "Member does not exist."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn post_ban_member<S: WriteData>(
    State(state): State<S>,
    AdminCaller(admin): AdminCaller,
    Json(data): Json<BanMember>,
) -> Result<Json<MemberStatusChangeResult>, StatusCode> {
    let result = db_write!(state, move |cmds| {
        cmds.member_admin().ban_member(admin, data).await
    })?;
    Ok(result.into())
}

const PATH_POST_ACTIVATE_MEMBER: &str = "/moderation_api/admin/activate_member";

/// Activate a banned member.
///
/// Activating an active member succeeds with `changed = false`.
#[utoipa::path(
    post,
    path = PATH_POST_ACTIVATE_MEMBER,
    request_body = ActivateMember,
    responses(
        (status = 200, description = "Successful.", body = MemberStatusChangeResult),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 404, description = "Member does not exist."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn post_activate_member<S: WriteData>(
    State(state): State<S>,
    AdminCaller(admin): AdminCaller,
    Json(data): Json<ActivateMember>,
) -> Result<Json<MemberStatusChangeResult>, StatusCode> {
    let result = db_write!(state, move |cmds| {
        cmds.member_admin().activate_member(admin, data).await
    })?;
    Ok(result.into())
}

pub fn admin_member_router<S: StateBase + ReadData + WriteData>(s: S) -> OpenApiRouter {
    create_open_api_router!(
        s,
        get_member::<S>,
        post_ban_member::<S>,
        post_activate_member::<S>,
    )
}
