use axum::{Extension, extract::State};
use model::{CallerIdentity, Report, SubmitReport};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::{StateBase, WriteData},
    create_open_api_router, db_write,
    utils::{Json, StatusCode},
};

const PATH_POST_REPORT: &str = "/moderation_api/report";

/// Report a thread or a comment.
///
/// Returns the existing report if the caller has already reported the
/// same content and the report is still pending. This depends on server
/// configuration.
#[utoipa::path(
    post,
    path = PATH_POST_REPORT,
    request_body = SubmitReport,
    responses(
        (status = 200, description = "Successful.", body = Report),
        (status = 400, description = "Invalid report reason or content type."),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is banned."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn post_report<S: WriteData>(
    State(state): State<S>,
    Extension(api_caller): Extension<CallerIdentity>,
    Json(data): Json<SubmitReport>,
) -> Result<Json<Report>, StatusCode> {
    let report = db_write!(state, move |cmds| {
        cmds.report().submit_report(api_caller.id, data).await
    })?;
    Ok(report.into())
}

pub fn report_router<S: StateBase + WriteData>(s: S) -> OpenApiRouter {
    create_open_api_router!(s, post_report::<S>,)
}
