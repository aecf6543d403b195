use axum::extract::State;
use model::{IssueWarning, IssueWarningResult, WarningList};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::{ReadData, StateBase, WriteData},
    create_open_api_router, db_write,
    utils::{AdminCaller, Json, StatusCode},
};

const PATH_POST_ISSUE_WARNING: &str = "/moderation_api/admin/issue_warning";

/// Issue a warning to a member.
///
/// The member is banned automatically when the warning count reaches
/// the configured threshold. Warning a banned member is a conflict.
/// Do not retry without checking the warnings first.
#[utoipa::path(
    post,
    path = PATH_POST_ISSUE_WARNING,
    request_body = IssueWarning,
    responses(
        (status = 200, description = "Successful.", body = IssueWarningResult),
        (status = 400, description = "Empty reason or message."),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 404, description = "Member does not exist."),
        (status = 409, description = "Member is banned."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn post_issue_warning<S: WriteData>(
    State(state): State<S>,
    AdminCaller(admin): AdminCaller,
    Json(data): Json<IssueWarning>,
) -> Result<Json<IssueWarningResult>, StatusCode> {
    let result = db_write!(state, move |cmds| {
        cmds.warning_admin().issue_warning(admin, data).await
    })?;
    Ok(result.into())
}

const PATH_GET_ALL_WARNINGS: &str = "/moderation_api/admin/warnings";

/// Get all warnings. Oldest first.
#[utoipa::path(
    get,
    path = PATH_GET_ALL_WARNINGS,
    responses(
        (status = 200, description = "Successful.", body = WarningList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn get_all_warnings<S: ReadData>(
    State(state): State<S>,
    AdminCaller(_admin): AdminCaller,
) -> Result<Json<WarningList>, StatusCode> {
    let warnings = state.read().warning().all_warnings().await?;
    Ok(WarningList { warnings }.into())
}

pub fn admin_warning_router<S: StateBase + ReadData + WriteData>(s: S) -> OpenApiRouter {
    create_open_api_router!(s, post_issue_warning::<S>, get_all_warnings::<S>,)
}
