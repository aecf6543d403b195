use std::future::Future;

use server_api::{
    DataError,
    app::{ReadData, StateBase, WriteData},
    moderation, moderation_admin,
    result::Result,
};
use server_data::{read::ReadCommands, write_commands::WriteCmds};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "moderation-backend",
    description = "Moderation and trust enforcement API",
    version = "0.1.0",
))]
pub struct ApiDoc;

impl ApiDoc {
    pub const URL: &'static str = "/api-doc/moderation_api.json";

    pub fn all() -> utoipa::openapi::OpenApi {
        let state = AppStateEmpty;
        let mut doc = ApiDoc::openapi();
        doc.merge(server_api::ApiDocModeration::openapi());
        let member = ApiDoc::openapi()
            .merge_from(moderation::report_router(state.clone()).into_openapi())
            .merge_from(moderation::status_router(state.clone()).into_openapi())
            .merge_from(moderation::warning_router(state.clone()).into_openapi())
            .tag_routes("moderation");
        doc.merge(member);
        let admin = ApiDoc::openapi()
            .merge_from(moderation_admin::admin_report_router(state.clone()).into_openapi())
            .merge_from(moderation_admin::admin_warning_router(state.clone()).into_openapi())
            .merge_from(moderation_admin::admin_member_router(state.clone()).into_openapi())
            .tag_routes("moderation_admin");
        doc.merge(admin);
        doc
    }

    pub fn open_api_json_string() -> std::result::Result<String, serde_json::Error> {
        Self::all().to_pretty_json()
    }
}

trait OpenApiExtensions: Sized {
    fn tag_routes(self, tag: &str) -> Self;
}

impl OpenApiExtensions for utoipa::openapi::OpenApi {
    fn tag_routes(mut self, tag: &str) -> Self {
        let handle_operation = |operation: Option<&mut utoipa::openapi::path::Operation>| {
            if let Some(operation) = operation {
                operation.tags = Some(vec![tag.to_string()]);
            }
        };

        for (_, item) in self.paths.paths.iter_mut() {
            handle_operation(item.get.as_mut());
            handle_operation(item.put.as_mut());
            handle_operation(item.post.as_mut());
            handle_operation(item.delete.as_mut());
            handle_operation(item.patch.as_mut());
        }
        self
    }
}

/// Router state for API documentation generation. Handlers are never
/// called with this state.
#[derive(Clone)]
struct AppStateEmpty;

impl StateBase for AppStateEmpty {}

impl ReadData for AppStateEmpty {
    fn read(&self) -> ReadCommands<'_> {
        unimplemented!()
    }
}

impl WriteData for AppStateEmpty {
    async fn write<
        CmdResult: Send + 'static,
        Cmd: Future<Output = Result<CmdResult, DataError>> + Send + 'static,
        GetCmd: FnOnce(WriteCmds) -> Cmd + Send + 'static,
    >(
        &self,
        _cmd: GetCmd,
    ) -> Result<CmdResult, DataError> {
        unimplemented!()
    }
}
