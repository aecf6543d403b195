#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod api_doc;
pub mod app;

use std::sync::Arc;

use api_doc::ApiDoc;
use app::{AppState, routes_connected::ConnectedApp};
use async_trait::async_trait;
use axum::Router;
use config::Config;
use server_data::{
    content::content_service_from_config, db_manager::DatabaseManager,
    write_commands::WriteCommandRunnerHandle,
};
use simple_backend::BusinessLogic;
use tracing::{error, info};
use utoipa_swagger_ui::SwaggerUi;

pub struct ModerationServer {
    config: Arc<Config>,
}

impl ModerationServer {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub async fn run(self) {
        let logic = ModerationBusinessLogic {
            config: self.config.clone(),
            database_manager: None,
            write_queue: None,
        };
        let server =
            simple_backend::SimpleBackend::new(logic, self.config.simple_backend().clone());
        server.run().await;
    }
}

pub struct ModerationBusinessLogic {
    config: Arc<Config>,
    database_manager: Option<DatabaseManager>,
    write_queue: Option<WriteCommandRunnerHandle>,
}

#[async_trait]
impl BusinessLogic for ModerationBusinessLogic {
    type AppState = AppState;

    fn public_api_router(&self, state: &Self::AppState) -> Router {
        ConnectedApp::new(state.clone()).router()
    }

    fn create_swagger_ui(&self) -> Option<SwaggerUi> {
        Some(SwaggerUi::new("/swagger-ui").url(ApiDoc::URL, ApiDoc::all()))
    }

    async fn on_before_server_start(&mut self) -> Option<Self::AppState> {
        let content_service = match content_service_from_config(&self.config) {
            Ok(service) => service,
            Err(e) => {
                error!("Content service init failed: {:?}", e);
                return None;
            }
        };

        let (database_manager, read_handle, write_handle) =
            match DatabaseManager::new(self.config.clone(), content_service).await {
                Ok(handles) => handles,
                Err(e) => {
                    error!("Database init failed: {:?}", e);
                    return None;
                }
            };

        let write_queue = WriteCommandRunnerHandle::new(write_handle);
        let state = AppState::create_app_state(read_handle, write_queue.clone(), self.config.clone());

        self.database_manager = Some(database_manager);
        self.write_queue = Some(write_queue);
        Some(state)
    }

    async fn on_after_server_quit(self) {
        let write_queue_guard = match &self.write_queue {
            Some(write_queue) => Some(write_queue.wait_running_writes().await),
            None => None,
        };
        if let Some(database_manager) = self.database_manager {
            database_manager.close().await;
            info!("Databases closed");
        }
        drop(write_queue_guard);
    }
}
