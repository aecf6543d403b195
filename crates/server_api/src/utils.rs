use axum::{
    extract::{FromRequest, FromRequestParts, Request, State, rejection::JsonRejection},
    middleware::Next,
    response::{IntoResponse, Response},
};
use error_stack::Report;
use http::request::Parts;
use model::{AccessToken, CallerIdentity, MemberId, MemberStatus};
use serde::Serialize;
use simple_backend_config::RUNNING_IN_DEBUG_MODE;
use tracing::error;
use utoipa::{
    Modify,
    openapi::security::{ApiKeyValue, SecurityScheme},
};

use crate::{DataError, app::GetAccessTokens, result::WrappedReport};

pub const ACCESS_TOKEN_HEADER_STR: &str = "x-access-token";

/// Middleware for authenticating requests with access tokens.
///
/// The caller identity is read from the database on every request, so
/// a ban or a role change takes effect on the next request.
///
/// Adds `CallerIdentity` extension to request, so that adding
/// "Extension(api_caller): Extension<CallerIdentity>"
/// to handlers is possible.
pub async fn authenticate_with_access_token<S: GetAccessTokens>(
    State(state): State<S>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let header = req
        .headers()
        .get(ACCESS_TOKEN_HEADER_STR)
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let key_str = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;
    let key = AccessToken::new(key_str.to_string());

    let caller = state
        .caller_identity(key)
        .await?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if caller.status == MemberStatus::Banned {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

/// Extractor for admin only routes. Requires
/// [authenticate_with_access_token] middleware.
///
/// Contains the admin's member ID.
#[derive(Debug, Clone, Copy)]
pub struct AdminCaller(pub MemberId);

impl<S: Send + Sync> FromRequestParts<S> for AdminCaller {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .extensions
            .get::<CallerIdentity>()
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if caller.is_admin() {
            Ok(AdminCaller(caller.id))
        } else {
            Err(StatusCode::FORBIDDEN)
        }
    }
}

/// Utoipa API doc security config
pub struct SecurityApiAccessTokenDefault;

impl Modify for SecurityApiAccessTokenDefault {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "access_token",
                SecurityScheme::ApiKey(utoipa::openapi::security::ApiKey::Header(
                    ApiKeyValue::new(ACCESS_TOKEN_HEADER_STR),
                )),
            )
        }
    }
}

// Prevent axum from exposing API details in errors when not running in
// debug mode.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: http::StatusCode,
    message: String,
}

/// Invalid JSON and JSON not matching the request type are validation
/// errors.
impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        let status = match &value {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                http::StatusCode::BAD_REQUEST
            }
            _ => value.status(),
        };
        Self {
            status,
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let json_error = if RUNNING_IN_DEBUG_MODE.value() {
            serde_json::json!({
                "status": self.status.as_u16(),
                "status_message": self.status.to_string(),
                "message": self.message,
            })
        } else {
            serde_json::json!({
                "status": self.status.as_u16(),
            })
        };

        (self.status, axum::Json(json_error)).into_response()
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 400
    BAD_REQUEST,
    /// 401
    UNAUTHORIZED,
    /// 403
    FORBIDDEN,
    /// 404
    NOT_FOUND,
    /// 409
    CONFLICT,
    /// 500
    INTERNAL_SERVER_ERROR,
    /// 503
    SERVICE_UNAVAILABLE,
}

impl From<StatusCode> for http::StatusCode {
    fn from(value: StatusCode) -> Self {
        match value {
            StatusCode::BAD_REQUEST => http::StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED => http::StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN => http::StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND => http::StatusCode::NOT_FOUND,
            StatusCode::CONFLICT => http::StatusCode::CONFLICT,
            StatusCode::INTERNAL_SERVER_ERROR => http::StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE => http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        let status: http::StatusCode = self.into();
        status.into_response()
    }
}

#[derive(thiserror::Error, Debug)]
enum RequestError {
    #[error("Data reading or writing failed")]
    Data,
}

impl StatusCode {
    /// Errors which the caller can handle are not logged. Other errors
    /// are logged with the full report.
    #[track_caller]
    fn from_data_error(error: WrappedReport<Report<DataError>>) -> Self {
        match error.current_context() {
            DataError::Validation => Self::BAD_REQUEST,
            DataError::NotAllowed => Self::FORBIDDEN,
            DataError::NotFound => Self::NOT_FOUND,
            DataError::Conflict => Self::CONFLICT,
            DataError::ContentServiceUnavailable => Self::SERVICE_UNAVAILABLE,
            _ => {
                error!("{:?}", error.change_context(RequestError::Data));
                Self::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<WrappedReport<Report<DataError>>> for StatusCode {
    #[track_caller]
    fn from(value: WrappedReport<Report<DataError>>) -> Self {
        Self::from_data_error(value)
    }
}

/// Convert error to status code. This is workaround for track_caller seems
/// to not work when converting using Into::into. Early return with ? seems
/// to have the correct caller location. This fixes error location printed
/// from db_write macro.
pub trait ConvertDataErrorToStatusCode<Ok> {
    #[track_caller]
    fn convert_data_error_to_status_code(self) -> std::result::Result<Ok, StatusCode>;
}

impl<Ok> ConvertDataErrorToStatusCode<Ok>
    for std::result::Result<Ok, WrappedReport<Report<DataError>>>
{
    #[track_caller]
    fn convert_data_error_to_status_code(self) -> std::result::Result<Ok, StatusCode> {
        self.map_err(StatusCode::from_data_error)
    }
}

#[cfg(test)]
mod tests {
    use server_common::result::WrappedContextExt;

    use super::*;

    fn status(error: DataError) -> http::StatusCode {
        let error: WrappedReport<Report<DataError>> = error.report();
        StatusCode::from(error).into()
    }

    #[test]
    fn caller_errors_map_to_client_error_codes() {
        assert_eq!(status(DataError::Validation), http::StatusCode::BAD_REQUEST);
        assert_eq!(status(DataError::NotAllowed), http::StatusCode::FORBIDDEN);
        assert_eq!(status(DataError::NotFound), http::StatusCode::NOT_FOUND);
        assert_eq!(status(DataError::Conflict), http::StatusCode::CONFLICT);
    }

    #[test]
    fn content_service_unavailable_is_transient() {
        assert_eq!(
            status(DataError::ContentServiceUnavailable),
            http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn infrastructure_errors_are_internal_errors() {
        assert_eq!(
            status(DataError::Diesel),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(DataError::CommandRunnerQuit),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn conversion_uses_current_context() {
        let error: WrappedReport<Report<DataError>> = DataError::Diesel.report();
        let result: std::result::Result<(), WrappedReport<Report<DataError>>> =
            Err(error.change_context(DataError::Conflict));
        assert_eq!(
            result.convert_data_error_to_status_code(),
            Err(StatusCode::CONFLICT)
        );
    }
}
