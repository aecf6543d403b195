use axum::{
    Extension,
    extract::{Path, State},
};
use model::{CallerIdentity, MemberId, WarningList};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::{ReadData, StateBase},
    create_open_api_router,
    utils::{Json, StatusCode},
};

const PATH_GET_OWN_WARNINGS: &str = "/moderation_api/own_warnings";

/// Get warnings issued to the caller. Oldest first.
#[utoipa::path(
    get,
    path = PATH_GET_OWN_WARNINGS,
    responses(
        (status = 200, description = "Successful.", body = WarningList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is banned."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn get_own_warnings<S: ReadData>(
    State(state): State<S>,
    Extension(api_caller): Extension<CallerIdentity>,
) -> Result<Json<WarningList>, StatusCode> {
    let warnings = state
        .read()
        .warning()
        .warnings_for_member(api_caller.id)
        .await?;
    Ok(WarningList { warnings }.into())
}

const PATH_GET_WARNINGS: &str = "/moderation_api/warnings/{mid}";

/// Get warnings of a member. Oldest first.
///
/// # Access
/// Admins can get warnings of all members. Other members can get only
/// their own warnings.
#[utoipa::path(
    get,
    path = PATH_GET_WARNINGS,
    params(MemberId),
    responses(
        (status = 200, description = "Successful.", body = WarningList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin or the member."),
        (status = 404, description = "Member does not exist."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn get_warnings<S: ReadData>(
    State(state): State<S>,
    Extension(api_caller): Extension<CallerIdentity>,
    Path(member): Path<MemberId>,
) -> Result<Json<WarningList>, StatusCode> {
    if !api_caller.is_admin() && api_caller.id != member {
        return Err(StatusCode::FORBIDDEN);
    }

    let warnings = state.read().warning().warnings_for_member(member).await?;
    Ok(WarningList { warnings }.into())
}

pub fn warning_router<S: StateBase + ReadData>(s: S) -> OpenApiRouter {
    create_open_api_router!(s, get_own_warnings::<S>, get_warnings::<S>,)
}
