use axum::extract::{Path, Query, State};
use model::{
    DismissReport, Report, ReportId, ReportList, ReportQueryParams, ReportedContent,
    ResolveReport,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::{ReadData, StateBase, WriteData},
    create_open_api_router, db_write,
    utils::{AdminCaller, Json, StatusCode},
};

const PATH_GET_REPORTS: &str = "/moderation_api/admin/reports";

/// Get reports. Newest first.
#[utoipa::path(
    get,
    path = PATH_GET_REPORTS,
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Successful.", body = ReportList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn get_reports<S: ReadData>(
    State(state): State<S>,
    AdminCaller(_admin): AdminCaller,
    Query(params): Query<ReportQueryParams>,
) -> Result<Json<ReportList>, StatusCode> {
    let reports = state.read().report().reports(params.status).await?;
    Ok(ReportList { reports }.into())
}

const PATH_POST_RESOLVE_REPORT: &str = "/moderation_api/admin/resolve_report";

/// Resolve a pending report and remove the reported content.
///
/// The report stays pending if the content service is unavailable.
/// Do not retry without checking the report state first.
#[utoipa::path(
    post,
    path = PATH_POST_RESOLVE_REPORT,
    request_body = ResolveReport,
    responses(
        (status = 200, description = "Successful.", body = Report),
        (status = 400, description = "Empty action taken."),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 404, description = "Report does not exist."),
        (status = 409, description = "Report is already resolved or dismissed."),
        (status = 503, description = "Content service is unavailable."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn post_resolve_report<S: WriteData>(
    State(state): State<S>,
    AdminCaller(admin): AdminCaller,
    Json(data): Json<ResolveReport>,
) -> Result<Json<Report>, StatusCode> {
    let report = db_write!(state, move |cmds| {
        cmds.report_admin().resolve_report(admin, data).await
    })?;
    Ok(report.into())
}

const PATH_POST_DISMISS_REPORT: &str = "/moderation_api/admin/dismiss_report";

/// Dismiss a pending report.
#[utoipa::path(
    post,
    path = PATH_POST_DISMISS_REPORT,
    request_body = DismissReport,
    responses(
        (status = 200, description = "Successful.", body = Report),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 404, description = "Report does not exist."),
        (status = 409, description = "Report is already resolved or dismissed."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn post_dismiss_report<S: WriteData>(
    State(state): State<S>,
    AdminCaller(admin): AdminCaller,
    Json(data): Json<DismissReport>,
) -> Result<Json<Report>, StatusCode> {
    let report = db_write!(state, move |cmds| {
        cmds.report_admin().dismiss_report(admin, data).await
    })?;
    Ok(report.into())
}

const PATH_GET_REPORTED_CONTENT: &str = "/moderation_api/admin/reported_content/{rid}";

/// Get the reported thread or comment for review.
///
/// Deleted content is not an error. The preview is then missing.
#[utoipa::path(
    get,
    path = PATH_GET_REPORTED_CONTENT,
    params(ReportId),
    responses(
        (status = 200, description = "Successful.", body = ReportedContent),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not an admin."),
        (status = 404, description = "Report does not exist."),
        (status = 503, description = "Content service is unavailable."),
        (status = 500, description = "Internal server error."),
    ),
    security(("access_token" = [])),
)]
pub async fn get_reported_content<S: ReadData>(
    State(state): State<S>,
    AdminCaller(_admin): AdminCaller,
    Path(report): Path<ReportId>,
) -> Result<Json<ReportedContent>, StatusCode> {
    let content = state.read().report().reported_content(report).await?;
    Ok(content.into())
}

pub fn admin_report_router<S: StateBase + ReadData + WriteData>(s: S) -> OpenApiRouter {
    create_open_api_router!(
        s,
        get_reports::<S>,
        post_resolve_report::<S>,
        post_dismiss_report::<S>,
        get_reported_content::<S>,
    )
}
