#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! HTTP API types and request handlers for the moderation server.

use utoipa::OpenApi;

use self::utils::SecurityApiAccessTokenDefault;

// Routes
pub mod moderation;
pub mod moderation_admin;

pub mod app;
pub mod utils;

pub use server_common::{data::DataError, result};

// API docs

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        model::ContentType,
        model::ReportStatus,
        model::MemberStatus,
    )),
    modifiers(&SecurityApiAccessTokenDefault),
)]
pub struct ApiDocModeration;

/// Macro for writing data with different code style.
/// Makes "async move" keywords unnecessary. Commands are awaited inside
/// the macro "closure", so borrows of `cmds` end before the closure body.
///
/// This macro will guarantee that contents of the closure will run
/// completely even if HTTP connection fails when closure is running.
///
/// Converts crate::DataError to crate::utils::StatusCode.
///
/// Example usage:
///
/// ```
/// use server_api::db_write;
/// use server_api::utils::StatusCode;
/// use server_api::app::WriteData;
/// pub async fn axum_route_handler<S: WriteData>(
///     state: S,
/// ) -> std::result::Result<(), StatusCode> {
///     db_write!(state, move |cmds| {
///         drop(cmds);
///         Ok(())
///     })
/// }
/// ```
#[macro_export]
macro_rules! db_write {
    ($state:expr, move |$cmds:ident| $commands:expr) => {{
        let r = async {
            let r: $crate::result::Result<_, $crate::DataError> = $state
                .write(move |$cmds| async move {
                    $commands
                })
                .await;
            r
        }
        .await;

        use $crate::utils::ConvertDataErrorToStatusCode;
        r.convert_data_error_to_status_code()
    }};
}

#[macro_export]
macro_rules! create_open_api_router {
    (
        $state_instance:ident,
        $(
            $path:ident::<$state_type:ty>,
        )*
    ) => {
        {
            $(
                let $path = $path::<$state_type>;
            )*
            utoipa_axum::router::OpenApiRouter::new()
            $(
                .merge(utoipa_axum::router::OpenApiRouter::new().routes(utoipa_axum::routes!($path)))
            )*
            .with_state($state_instance)
        }
    };
}
