use axum::Extension;
use model::{CallerIdentity, OwnMemberStatus};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::StateBase,
    create_open_api_router,
    utils::{Json, StatusCode},
};

const PATH_GET_MEMBER_STATUS: &str = "/moderation_api/member_status";

/// Get caller's roles and status.
///
/// Banned members can not access this because every authenticated
/// route rejects banned members.
#[utoipa::path(
    get,
    path = PATH_GET_MEMBER_STATUS,
    responses(
        (status = 200, description = "Successful.", body = OwnMemberStatus),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is banned."),
    ),
    security(("access_token" = [])),
)]
pub async fn get_member_status<S: StateBase>(
    Extension(api_caller): Extension<CallerIdentity>,
) -> Result<Json<OwnMemberStatus>, StatusCode> {
    Ok(OwnMemberStatus::from(api_caller).into())
}

pub fn status_router<S: StateBase>(s: S) -> OpenApiRouter {
    create_open_api_router!(s, get_member_status::<S>,)
}
